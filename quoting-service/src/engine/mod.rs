//! Calculation engine for quoting-service.
//!
//! One consolidated, pure calculation core consumed by quotations and
//! invoices alike. Everything here is synchronous, side-effect-free and O(n)
//! over line count; defaults always arrive as explicit parameters.

pub mod balance;
pub mod discount;
pub mod pricing;
pub mod totals;

use rust_decimal::Decimal;

use crate::models::Document;

/// Parse interactive numeric entry. Unparseable text (including non-finite
/// spellings) coerces to zero, negatives clamp to zero; transient invalid
/// states during entry are never a hard failure.
pub fn decimal_from_input(raw: &str) -> Decimal {
    raw.trim()
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// One full recomputation pass over a document working copy:
/// re-apply discount pricing, normalize quantities, re-derive per-line
/// pricing, aggregate totals, reconcile the balance. Referentially
/// transparent: the result depends only on current state, so repeated or
/// reordered passes converge on the same figures.
pub fn recompute(doc: &mut Document) {
    discount::propagate_discount(&mut doc.lines, doc.discount_percent);

    for line in &mut doc.lines {
        line.base_quantity = line.quantity.base_quantity();
        let priced = pricing::price_line(
            line.base_quantity,
            line.unit_price_ex_vat,
            line.vat_rate_percent,
        );
        line.unit_vat = priced.unit_vat;
        line.unit_price_inc_vat = priced.unit_price_inc_vat;
        line.line_total = priced.line_total;
    }

    let totals = totals::aggregate(&doc.lines);
    doc.subtotal = totals.subtotal;
    doc.vat_amount = totals.vat_amount;
    doc.total_amount = totals.total_amount;
    doc.discount_amount = discount::discount_delta(&doc.lines);

    balance::reconcile(doc);
}
