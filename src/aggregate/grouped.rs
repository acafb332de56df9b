use crate::model::{
    pct, AxisBucket, AxisPerformance, CanonicalRecord, ProgramBucket, ProgramPerformance, NO_AXIS,
};

use super::fold_by_key;

/// Per-program rollup keyed on `program_label`. The normalizer guarantees
/// the label is never empty, so no fallback is applied here.
pub fn aggregate_by_program(records: &[CanonicalRecord]) -> ProgramPerformance {
    let mut programs = fold_by_key(
        records,
        program_key,
        |_| ProgramBucket::default(),
        |b, r| {
            b.record_count += 1;
            b.q1_plan += r.q1_plan;
            b.q1_exec += r.q1_exec;
            b.q2_plan += r.q2_plan;
            b.q2_exec += r.q2_exec;
            b.q3_plan += r.q3_plan;
            b.q3_exec += r.q3_exec;
            b.q4_plan += r.q4_plan;
            b.q4_exec += r.q4_exec;
            b.total_plan += r.total_plan;
            b.total_exec += r.total_exec;
        },
    );

    for bucket in programs.values_mut() {
        bucket.q1_compliance = pct(bucket.q1_exec, bucket.q1_plan);
        bucket.q2_compliance = pct(bucket.q2_exec, bucket.q2_plan);
        bucket.q3_compliance = pct(bucket.q3_exec, bucket.q3_plan);
        bucket.q4_compliance = pct(bucket.q4_exec, bucket.q4_plan);
        bucket.total_compliance = pct(bucket.total_exec, bucket.total_plan);
    }
    programs
}

/// Per-axis rollup keyed on `axis` (`NO_AXIS` when empty). The axis weight
/// is captured from the first record seen for each axis, not summed.
pub fn aggregate_by_axis(records: &[CanonicalRecord]) -> AxisPerformance {
    let mut axes = fold_by_key(
        records,
        axis_key,
        |first| AxisBucket {
            weight: first.axis_weight,
            ..Default::default()
        },
        |b, r| {
            b.record_count += 1;
            b.total_plan += r.total_plan;
            b.total_exec += r.total_exec;
            b.appropriation += r.final_appropriation;
            b.commitments += r.commitments;
            b.payments += r.payments;
        },
    );

    for bucket in axes.values_mut() {
        bucket.physical_progress = pct(bucket.total_exec, bucket.total_plan);
        bucket.financial_execution = pct(bucket.payments, bucket.appropriation);
    }
    axes
}

fn program_key(record: &CanonicalRecord) -> &str {
    &record.program_label
}

pub(crate) fn axis_key(record: &CanonicalRecord) -> &str {
    if record.axis.is_empty() {
        NO_AXIS
    } else {
        &record.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::record;

    #[test]
    fn program_buckets_accumulate_and_derive_ratios() {
        let records = vec![
            record(|r| {
                r.program_label = "Roads".to_string();
                r.q1_plan = 10.0;
                r.q1_exec = 5.0;
                r.total_plan = 10.0;
                r.total_exec = 5.0;
            }),
            record(|r| {
                r.program_label = "Roads".to_string();
                r.q1_plan = 10.0;
                r.q1_exec = 10.0;
                r.total_plan = 10.0;
                r.total_exec = 10.0;
            }),
            record(|r| {
                r.program_label = "Health".to_string();
                r.total_plan = 4.0;
                r.total_exec = 1.0;
            }),
        ];

        let programs = aggregate_by_program(&records);
        assert_eq!(programs.len(), 2);

        let roads = &programs["Roads"];
        assert_eq!(roads.record_count, 2);
        assert_eq!(roads.q1_plan, 20.0);
        assert_eq!(roads.q1_compliance, 75.0);
        assert_eq!(roads.total_compliance, 75.0);
        assert_eq!(roads.q2_compliance, 0.0);

        let health = &programs["Health"];
        assert_eq!(health.record_count, 1);
        assert_eq!(health.total_compliance, 25.0);
    }

    #[test]
    fn bucket_order_mirrors_first_seen() {
        let records = vec![
            record(|r| r.program_label = "B".to_string()),
            record(|r| r.program_label = "A".to_string()),
            record(|r| r.program_label = "B".to_string()),
        ];
        let programs = aggregate_by_program(&records);
        let keys: Vec<&str> = programs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["B", "A"]);
    }

    #[test]
    fn grouping_is_complete_and_conserves_counts() {
        let records = vec![
            record(|r| r.program_label = "A".to_string()),
            record(|r| r.program_label = "B".to_string()),
            record(|r| r.program_label = "A".to_string()),
        ];
        let programs = aggregate_by_program(&records);
        for r in &records {
            assert!(programs.contains_key(&r.program_label));
        }
        let total: usize = programs.values().map(|b| b.record_count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn axis_weight_comes_from_first_record() {
        let records = vec![
            record(|r| {
                r.axis = "Social".to_string();
                r.axis_weight = 0.4;
            }),
            record(|r| {
                r.axis = "Social".to_string();
                r.axis_weight = 0.9;
            }),
        ];
        let axes = aggregate_by_axis(&records);
        assert_eq!(axes["Social"].weight, 0.4);
        assert_eq!(axes["Social"].record_count, 2);
    }

    #[test]
    fn axis_buckets_derive_both_ratios() {
        let records = vec![
            record(|r| {
                r.axis = "Social".to_string();
                r.total_plan = 100.0;
                r.total_exec = 80.0;
                r.final_appropriation = 1000.0;
                r.commitments = 700.0;
                r.payments = 500.0;
            }),
            record(|r| {
                r.total_plan = 10.0; // no axis
            }),
        ];
        let axes = aggregate_by_axis(&records);
        let social = &axes["Social"];
        assert_eq!(social.physical_progress, 80.0);
        assert_eq!(social.financial_execution, 50.0);

        let unassigned = &axes["No Axis"];
        assert_eq!(unassigned.record_count, 1);
        assert_eq!(unassigned.physical_progress, 0.0);
        assert_eq!(unassigned.financial_execution, 0.0);
    }
}
