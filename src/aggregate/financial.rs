use crate::model::{
    pct, CanonicalRecord, FinancialBucket, FinancialSummary, FinancialTotals, UNASSIGNED_PROGRAM,
};

use super::{fold_by_key, grouped::axis_key};

/// Fold records into the financial summary: a grand total plus per-program
/// and per-axis breakdowns of appropriation, commitments and payments.
///
/// The program breakdown keys on the dedicated program name (not the
/// record's `program_label`), so its key set is intentionally independent
/// of the program performance view's.
pub fn aggregate_financial(records: &[CanonicalRecord]) -> FinancialSummary {
    let mut total = FinancialTotals::default();
    for r in records {
        total.appropriation += r.final_appropriation;
        total.commitments += r.commitments;
        total.payments += r.payments;
        total.financial_plan += r.financial_plan_amount;
    }
    total.commitments_pct = pct(total.commitments, total.appropriation);
    total.payments_pct = pct(total.payments, total.appropriation);

    let mut by_program = fold_by_key(
        records,
        program_name_key,
        |_| FinancialBucket::default(),
        accumulate,
    );
    let mut by_axis = fold_by_key(records, axis_key, |_| FinancialBucket::default(), accumulate);

    for bucket in by_program.values_mut().chain(by_axis.values_mut()) {
        bucket.commitments_pct = pct(bucket.commitments, bucket.appropriation);
        bucket.payments_pct = pct(bucket.payments, bucket.appropriation);
    }

    FinancialSummary {
        total,
        by_program,
        by_axis,
    }
}

fn program_name_key(record: &CanonicalRecord) -> &str {
    if record.program_name.is_empty() {
        UNASSIGNED_PROGRAM
    } else {
        &record.program_name
    }
}

fn accumulate(bucket: &mut FinancialBucket, r: &CanonicalRecord) {
    bucket.appropriation += r.final_appropriation;
    bucket.commitments += r.commitments;
    bucket.payments += r.payments;
}
