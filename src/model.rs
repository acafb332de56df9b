use indexmap::IndexMap;
use serde::Serialize;

/// Program label used when a record carries neither a program nor a
/// subprogram name.
pub const UNASSIGNED_PROGRAM: &str = "Unassigned Program";

/// Axis key used when a record carries no strategic axis.
pub const NO_AXIS: &str = "No Axis";

/// Round half-away-from-zero to 1 decimal place. Applied only at the point
/// of external exposure; internal sums stay exact.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// `num / den * 100`, rounded to 1 decimal, or 0 when `den` is not positive.
pub fn pct(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        round1(num / den * 100.0)
    } else {
        0.0
    }
}

/// Progress band for a record. Pure function of `progress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Evaluation {
    #[serde(rename = "High Progress")]
    HighProgress,
    #[serde(rename = "Medium Progress")]
    MediumProgress,
    #[serde(rename = "Low Progress")]
    LowProgress,
    #[serde(rename = "Not Scheduled")]
    NotScheduled,
}

impl Evaluation {
    pub fn from_progress(progress: f64) -> Self {
        if progress >= 90.0 {
            Evaluation::HighProgress
        } else if progress >= 70.0 {
            Evaluation::MediumProgress
        } else if progress > 0.0 {
            Evaluation::LowProgress
        } else {
            Evaluation::NotScheduled
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Evaluation::HighProgress => "High Progress",
            Evaluation::MediumProgress => "Medium Progress",
            Evaluation::LowProgress => "Low Progress",
            Evaluation::NotScheduled => "Not Scheduled",
        }
    }
}

/// One normalized planning record. Built once per normalization pass, in
/// source order, and immutable afterwards. Every numeric field is a
/// well-defined number; absent or malformed source cells coerce to 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// First non-empty of the two candidate source codes, else the 1-based
    /// row position rendered as text.
    pub id: String,

    // Hierarchy
    pub axis: String,
    pub axis_weight: f64,
    pub sector_name: String,
    pub program_code: String,
    pub program_name: String,
    pub subprogram_code: String,
    pub subprogram_name: String,

    // Result level
    pub result_goal: String,
    pub result_indicator: String,
    pub baseline: f64,

    // Product level
    pub product_goal: String,
    pub measurement_unit: String,
    pub indicator: String,
    pub responsible: String,
    pub expected_cumulative_value: f64,
    pub expected_value_year: f64,
    pub executed_vs_cumulative_pct: f64,

    // Quarterly planned/executed quantities
    pub q1_plan: f64,
    pub q1_exec: f64,
    pub q2_plan: f64,
    pub q2_exec: f64,
    pub q3_plan: f64,
    pub q3_exec: f64,
    pub q4_plan: f64,
    pub q4_exec: f64,

    /// Declared total when present and non-zero, else the sum of quarters.
    pub total_plan: f64,
    pub total_exec: f64,

    /// Normalized 0-100 execution ratio; see `normalize::derive_progress`.
    pub progress: f64,

    // Financial
    pub final_appropriation: f64,
    pub commitments: f64,
    pub payments: f64,
    pub financial_execution_pct: f64,
    pub financial_plan_amount: f64,

    /// First non-empty of program/subprogram name, else `UNASSIGNED_PROGRAM`.
    pub program_label: String,
    pub evaluation: Evaluation,
}

impl CanonicalRecord {
    /// `(plan, exec)` per quarter, in order.
    pub fn quarters(&self) -> [(f64, f64); 4] {
        [
            (self.q1_plan, self.q1_exec),
            (self.q2_plan, self.q2_exec),
            (self.q3_plan, self.q3_exec),
            (self.q4_plan, self.q4_exec),
        ]
    }
}

/// Planned vs. executed quantities summed across all records, with one
/// compliance ratio per quarter plus one overall.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GlobalMetrics {
    pub record_count: usize,
    pub q1_plan: f64,
    pub q1_exec: f64,
    pub q2_plan: f64,
    pub q2_exec: f64,
    pub q3_plan: f64,
    pub q3_exec: f64,
    pub q4_plan: f64,
    pub q4_exec: f64,
    pub total_plan: f64,
    pub total_exec: f64,
    pub q1_compliance: f64,
    pub q2_compliance: f64,
    pub q3_compliance: f64,
    pub q4_compliance: f64,
    pub overall_compliance: f64,
}

/// Per-program rollup keyed on `program_label`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProgramBucket {
    pub record_count: usize,
    pub q1_plan: f64,
    pub q1_exec: f64,
    pub q2_plan: f64,
    pub q2_exec: f64,
    pub q3_plan: f64,
    pub q3_exec: f64,
    pub q4_plan: f64,
    pub q4_exec: f64,
    pub total_plan: f64,
    pub total_exec: f64,
    pub q1_compliance: f64,
    pub q2_compliance: f64,
    pub q3_compliance: f64,
    pub q4_compliance: f64,
    pub total_compliance: f64,
}

/// Per-axis rollup keyed on `axis` (`NO_AXIS` when empty).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AxisBucket {
    pub record_count: usize,
    /// Captured from the first record seen for the axis, not summed.
    pub weight: f64,
    pub total_plan: f64,
    pub total_exec: f64,
    pub appropriation: f64,
    pub commitments: f64,
    pub payments: f64,
    pub physical_progress: f64,
    pub financial_execution: f64,
}

/// Appropriation/commitments/payments sums for one program or axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancialBucket {
    pub appropriation: f64,
    pub commitments: f64,
    pub payments: f64,
    pub commitments_pct: f64,
    pub payments_pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancialTotals {
    pub appropriation: f64,
    pub commitments: f64,
    pub payments: f64,
    pub financial_plan: f64,
    pub commitments_pct: f64,
    pub payments_pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total: FinancialTotals,
    pub by_program: IndexMap<String, FinancialBucket>,
    pub by_axis: IndexMap<String, FinancialBucket>,
}

/// First-seen key order mirrors the input sequence.
pub type ProgramPerformance = IndexMap<String, ProgramBucket>;
pub type AxisPerformance = IndexMap<String, AxisBucket>;
