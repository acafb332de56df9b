//! The blocking "compute now" entry point: read the table, normalize, and
//! fold the four views. All-or-nothing; a failed read yields no bundle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{
    aggregate_by_axis, aggregate_by_program, aggregate_financial, aggregate_global,
};
use crate::error::SourceUnavailable;
use crate::model::{
    AxisPerformance, CanonicalRecord, FinancialSummary, GlobalMetrics, ProgramPerformance,
};
use crate::normalize::normalize;
use crate::source::TableSource;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
    pub record_count: usize,
    pub source_id: String,
    pub computed_at: DateTime<Utc>,
}

/// Everything one pipeline run produces. Recomputed wholesale on every run;
/// the views are pure projections of `records`.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineBundle {
    pub records: Vec<CanonicalRecord>,
    pub global_metrics: GlobalMetrics,
    pub program_performance: ProgramPerformance,
    pub axis_performance: AxisPerformance,
    pub financial_summary: FinancialSummary,
    pub metadata: Metadata,
}

/// Run the full pipeline against `source`. The four aggregations are
/// independent folds over the same immutable record sequence.
pub fn run_pipeline(source: &dyn TableSource) -> Result<PipelineBundle, SourceUnavailable> {
    let sheet = source.read()?;
    info!(source = %sheet.source_id, rows = sheet.rows.len(), "sheet read");

    let records = normalize(&sheet.rows);

    let global_metrics = aggregate_global(&records);
    let program_performance = aggregate_by_program(&records);
    let axis_performance = aggregate_by_axis(&records);
    let financial_summary = aggregate_financial(&records);

    info!(
        records = records.len(),
        programs = program_performance.len(),
        axes = axis_performance.len(),
        overall_compliance = global_metrics.overall_compliance,
        "pipeline complete"
    );

    let metadata = Metadata {
        record_count: records.len(),
        source_id: sheet.source_id,
        computed_at: Utc::now(),
    };

    Ok(PipelineBundle {
        records,
        global_metrics,
        program_performance,
        axis_performance,
        financial_summary,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::pct;
    use crate::source::{RawRow, StaticSource};

    fn sample_rows() -> Vec<RawRow> {
        let row = |pairs: &[(&str, serde_json::Value)]| -> RawRow {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect()
        };
        vec![
            row(&[
                ("EJE", json!("Social")),
                ("PROGRAMA PDT", json!("Education")),
                ("T1 PLANEADO 2025", json!(100)),
                ("T1 EJECUTADO 2025", json!(90)),
                ("APROPIACION DEFINITIVA 2025", json!("2,000")),
                ("PAGOS 2025", json!(500)),
            ]),
            row(&[
                ("EJE", json!("Social")),
                ("SUBPROGRAMA", json!("Nutrition")),
                ("T2 PLANEADO 2025", json!(50)),
                ("T2 EJECUTADO 2025", json!(20)),
            ]),
            row(&[("INDICADOR", json!("orphan row"))]),
        ]
    }

    #[test]
    fn bundle_views_are_consistent_projections() {
        let source = StaticSource::new(sample_rows(), "test-sheet");
        let bundle = run_pipeline(&source).unwrap();

        assert_eq!(bundle.metadata.record_count, 3);
        assert_eq!(bundle.metadata.source_id, "test-sheet");
        assert_eq!(bundle.records.len(), 3);

        // Overall ratio matches the same computation over program buckets.
        let plan: f64 = bundle
            .program_performance
            .values()
            .map(|b| b.total_plan)
            .sum();
        let exec: f64 = bundle
            .program_performance
            .values()
            .map(|b| b.total_exec)
            .sum();
        assert_eq!(bundle.global_metrics.overall_compliance, pct(exec, plan));

        // Grouping completeness over both keyed views.
        for r in &bundle.records {
            assert!(bundle.program_performance.contains_key(&r.program_label));
        }
        assert!(bundle.axis_performance.contains_key("Social"));
        assert!(bundle.axis_performance.contains_key("No Axis"));
        let count: usize = bundle
            .program_performance
            .values()
            .map(|b| b.record_count)
            .sum();
        assert_eq!(count, bundle.records.len());
    }

    #[test]
    fn reruns_are_idempotent_apart_from_timestamp() {
        let source = StaticSource::new(sample_rows(), "test-sheet");
        let a = run_pipeline(&source).unwrap();
        let b = run_pipeline(&source).unwrap();

        assert_eq!(a.records, b.records);
        assert_eq!(a.global_metrics, b.global_metrics);
        assert_eq!(a.program_performance, b.program_performance);
        assert_eq!(a.axis_performance, b.axis_performance);
        assert_eq!(a.financial_summary, b.financial_summary);
        assert_eq!(a.metadata.record_count, b.metadata.record_count);
        assert_eq!(a.metadata.source_id, b.metadata.source_id);
    }

    #[test]
    fn failed_read_yields_no_bundle() {
        let source = crate::source::CsvTableSource::new("/no/such/file.csv");
        assert!(run_pipeline(&source).is_err());
    }
}
