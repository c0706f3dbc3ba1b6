//! Document totals aggregation.

use rust_decimal::Decimal;

use crate::models::LineItem;

use super::pricing::round_money;

/// Aggregated document totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
}

/// Sum real lines into subtotal, VAT and grand total. Placeholder lines are
/// excluded entirely. Always computed fresh from the live line array; no
/// partial sums are cached anywhere.
pub fn aggregate(lines: &[LineItem]) -> DocumentTotals {
    let mut subtotal = Decimal::ZERO;
    let mut vat = Decimal::ZERO;

    for line in lines.iter().filter(|l| l.is_real()) {
        subtotal += line.base_quantity * line.unit_price_ex_vat;
        vat += line.base_quantity * line.unit_vat;
    }

    let subtotal = round_money(subtotal);
    let vat_amount = round_money(vat);

    DocumentTotals {
        subtotal,
        vat_amount,
        total_amount: subtotal + vat_amount,
    }
}
