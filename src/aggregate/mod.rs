//! Pure folds over the canonical record sequence. Each aggregator consumes
//! the full sequence independently; none depends on another's output.

mod financial;
mod global;
mod grouped;

pub use financial::aggregate_financial;
pub use global::aggregate_global;
pub use grouped::{aggregate_by_axis, aggregate_by_program};

use indexmap::IndexMap;

use crate::model::CanonicalRecord;

/// Multi-key grouped fold. Buckets are created with `seed` the first time a
/// key is seen and updated with `step` for every record; iteration order of
/// the result mirrors first-seen order of keys in the input.
pub(crate) fn fold_by_key<B>(
    records: &[CanonicalRecord],
    key: impl Fn(&CanonicalRecord) -> &str,
    seed: impl Fn(&CanonicalRecord) -> B,
    step: impl Fn(&mut B, &CanonicalRecord),
) -> IndexMap<String, B> {
    let mut buckets: IndexMap<String, B> = IndexMap::new();
    for record in records {
        let bucket = buckets
            .entry(key(record).to_string())
            .or_insert_with(|| seed(record));
        step(bucket, record);
    }
    buckets
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{CanonicalRecord, Evaluation, UNASSIGNED_PROGRAM};

    /// Blank record with every field defaulted, tweaked by the closure.
    pub(crate) fn record(build: impl FnOnce(&mut CanonicalRecord)) -> CanonicalRecord {
        let mut r = CanonicalRecord {
            id: "1".to_string(),
            axis: String::new(),
            axis_weight: 0.0,
            sector_name: String::new(),
            program_code: String::new(),
            program_name: String::new(),
            subprogram_code: String::new(),
            subprogram_name: String::new(),
            result_goal: String::new(),
            result_indicator: String::new(),
            baseline: 0.0,
            product_goal: String::new(),
            measurement_unit: String::new(),
            indicator: String::new(),
            responsible: String::new(),
            expected_cumulative_value: 0.0,
            expected_value_year: 0.0,
            executed_vs_cumulative_pct: 0.0,
            q1_plan: 0.0,
            q1_exec: 0.0,
            q2_plan: 0.0,
            q2_exec: 0.0,
            q3_plan: 0.0,
            q3_exec: 0.0,
            q4_plan: 0.0,
            q4_exec: 0.0,
            total_plan: 0.0,
            total_exec: 0.0,
            progress: 0.0,
            final_appropriation: 0.0,
            commitments: 0.0,
            payments: 0.0,
            financial_execution_pct: 0.0,
            financial_plan_amount: 0.0,
            program_label: UNASSIGNED_PROGRAM.to_string(),
            evaluation: Evaluation::NotScheduled,
        };
        build(&mut r);
        r
    }
}
