use crate::model::{pct, CanonicalRecord, GlobalMetrics};

/// Fold all records into the global planned-vs-executed summary: one raw
/// sum per quarter and kind plus the grand totals, and a compliance ratio
/// per quarter plus one overall. Sums stay exact; only the ratios round.
pub fn aggregate_global(records: &[CanonicalRecord]) -> GlobalMetrics {
    let mut m = GlobalMetrics {
        record_count: records.len(),
        ..Default::default()
    };

    for r in records {
        m.q1_plan += r.q1_plan;
        m.q1_exec += r.q1_exec;
        m.q2_plan += r.q2_plan;
        m.q2_exec += r.q2_exec;
        m.q3_plan += r.q3_plan;
        m.q3_exec += r.q3_exec;
        m.q4_plan += r.q4_plan;
        m.q4_exec += r.q4_exec;
        m.total_plan += r.total_plan;
        m.total_exec += r.total_exec;
    }

    m.q1_compliance = pct(m.q1_exec, m.q1_plan);
    m.q2_compliance = pct(m.q2_exec, m.q2_plan);
    m.q3_compliance = pct(m.q3_exec, m.q3_plan);
    m.q4_compliance = pct(m.q4_exec, m.q4_plan);
    m.overall_compliance = pct(m.total_exec, m.total_plan);
    m
}
