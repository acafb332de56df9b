//! Row Normalizer: raw sheet rows → canonical records.
//!
//! One pass, source order preserved. Malformed cells coerce locally and
//! never abort the pass.

mod coerce;
mod columns;

pub use coerce::{coerce_num, first_non_empty, num_field, text_field};

use tracing::debug;

use crate::model::{CanonicalRecord, Evaluation, UNASSIGNED_PROGRAM};
use crate::source::RawRow;

/// Normalize every raw row into a canonical record.
pub fn normalize(rows: &[RawRow]) -> Vec<CanonicalRecord> {
    let records: Vec<CanonicalRecord> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index))
        .collect();
    debug!(rows = rows.len(), records = records.len(), "normalization pass complete");
    records
}

fn normalize_row(row: &RawRow, index: usize) -> CanonicalRecord {
    let mut plans = [0.0f64; 4];
    let mut execs = [0.0f64; 4];
    for q in 0..4 {
        plans[q] = num_field(row, columns::QUARTER_PLAN[q]);
        execs[q] = num_field(row, columns::QUARTER_EXEC[q]);
    }

    let total_plan = derive_total(num_field(row, columns::TOTAL_PLAN), plans.iter().sum());
    let total_exec = derive_total(num_field(row, columns::TOTAL_EXEC), execs.iter().sum());

    let progress = derive_progress(num_field(row, columns::PROGRESS), total_plan, total_exec);

    let program_name = text_field(row, columns::PROGRAM_NAME);
    let subprogram_name = text_field(row, columns::SUBPROGRAM_NAME);
    let program_label = first_non_empty(
        &[program_name.as_str(), subprogram_name.as_str()],
        UNASSIGNED_PROGRAM,
    )
    .to_string();

    let id = {
        let code = text_field(row, columns::ID);
        if code.is_empty() {
            (index + 1).to_string()
        } else {
            code
        }
    };

    CanonicalRecord {
        id,
        axis: text_field(row, columns::AXIS),
        axis_weight: num_field(row, columns::AXIS_WEIGHT),
        sector_name: text_field(row, columns::SECTOR_NAME),
        program_code: text_field(row, columns::PROGRAM_CODE),
        program_name,
        subprogram_code: text_field(row, columns::SUBPROGRAM_CODE),
        subprogram_name,
        result_goal: text_field(row, columns::RESULT_GOAL),
        result_indicator: text_field(row, columns::RESULT_INDICATOR),
        baseline: num_field(row, columns::BASELINE),
        product_goal: text_field(row, columns::PRODUCT_GOAL),
        measurement_unit: text_field(row, columns::MEASUREMENT_UNIT),
        indicator: text_field(row, columns::INDICATOR),
        responsible: text_field(row, columns::RESPONSIBLE),
        expected_cumulative_value: num_field(row, columns::EXPECTED_CUMULATIVE_VALUE),
        expected_value_year: num_field(row, columns::EXPECTED_VALUE_YEAR),
        executed_vs_cumulative_pct: num_field(row, columns::EXECUTED_VS_CUMULATIVE_PCT),
        q1_plan: plans[0],
        q1_exec: execs[0],
        q2_plan: plans[1],
        q2_exec: execs[1],
        q3_plan: plans[2],
        q3_exec: execs[2],
        q4_plan: plans[3],
        q4_exec: execs[3],
        total_plan,
        total_exec,
        progress,
        final_appropriation: num_field(row, columns::FINAL_APPROPRIATION),
        commitments: num_field(row, columns::COMMITMENTS),
        payments: num_field(row, columns::PAYMENTS),
        financial_execution_pct: scale_fraction(num_field(row, columns::FINANCIAL_EXECUTION_PCT)),
        financial_plan_amount: num_field(row, columns::FINANCIAL_PLAN),
        program_label,
        evaluation: Evaluation::from_progress(progress),
    }
}

/// The declared total wins when non-zero; otherwise fall back to the sum
/// of quarters. Known source ambiguity: a declared total of exactly 0 is
/// indistinguishable from an absent cell, so a genuinely cancelled line
/// item still reports its quarterly sum.
fn derive_total(declared: f64, quarterly_sum: f64) -> f64 {
    if declared != 0.0 {
        declared
    } else {
        quarterly_sum
    }
}

/// Values in `(0, 1]` are ratios the source encoded instead of
/// percentages; scale them to 0-100. Anything else is left as declared.
fn scale_fraction(value: f64) -> f64 {
    if value > 0.0 && value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Progress self-healing, in order: scale fraction-encoded values, replace
/// out-of-range values with the exec/plan ratio, and fall back to that
/// ratio when the result is still zero.
fn derive_progress(declared: f64, total_plan: f64, total_exec: f64) -> f64 {
    let ratio = if total_plan > 0.0 {
        total_exec / total_plan * 100.0
    } else {
        0.0
    };

    let mut progress = scale_fraction(declared);
    if progress > 100.0 || progress < 0.0 {
        progress = ratio;
    }
    if progress == 0.0 {
        progress = ratio;
    }
    progress
}
