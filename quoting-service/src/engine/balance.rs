//! Balance reconciliation against payments and carried-over balance.

use rust_decimal::Decimal;
use service_core::error::AppError;

use crate::models::{Document, PaidAuthority};

use super::pricing::round_money;

/// Permitted drift between `amount_paid + balance_remaining` and the gross
/// total.
pub fn reconcile_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Recompute the non-authoritative side of the paid/balance pair from the
/// current gross total. The side the operator touched last is held fixed.
pub fn reconcile(doc: &mut Document) {
    let gross = doc.gross_total();
    match doc.paid_authority {
        PaidAuthority::AmountPaid => {
            doc.balance_remaining = (gross - doc.amount_paid).max(Decimal::ZERO);
        }
        PaidAuthority::BalanceRemaining => {
            doc.amount_paid = (gross - doc.balance_remaining).max(Decimal::ZERO);
        }
    }
}

/// Explicit amount-paid edit: takes authority and recomputes the balance.
pub fn edit_amount_paid(doc: &mut Document, amount: Decimal) {
    doc.amount_paid = round_money(amount.max(Decimal::ZERO));
    doc.paid_authority = PaidAuthority::AmountPaid;
    reconcile(doc);
}

/// Explicit balance edit: takes authority and recomputes the amount paid.
pub fn edit_balance_remaining(doc: &mut Document, desired_balance: Decimal) {
    doc.balance_remaining = round_money(desired_balance.max(Decimal::ZERO));
    doc.paid_authority = PaidAuthority::BalanceRemaining;
    reconcile(doc);
}

/// Verify the paid/balance pair still sums to the gross total. Drift beyond
/// tolerance is a programming fault, never a user-facing condition. The
/// check is skipped when either side exceeds the gross total, since the
/// clamp to zero intentionally breaks equality there.
pub fn check_reconciled(doc: &Document) -> Result<(), AppError> {
    let gross = doc.gross_total();
    if doc.amount_paid > gross || doc.balance_remaining > gross {
        return Ok(());
    }
    let drift = (doc.amount_paid + doc.balance_remaining - gross).abs();
    if drift > reconcile_tolerance() {
        return Err(AppError::InvariantViolation(anyhow::anyhow!(
            "paid {} + balance {} drifted from gross total {}",
            doc.amount_paid,
            doc.balance_remaining,
            gross
        )));
    }
    Ok(())
}
