//! Line pricing calculator.
//!
//! Every formula rounds at its stated decimal place before feeding the next
//! one, bounding error accumulation: unit-level figures at 3 decimals,
//! monetary figures at 2.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a unit-level figure (unit price, per-unit VAT) at 3 decimal places.
pub fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary figure (line and document totals) at 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// VAT rates live in [0, 100].
pub fn clamp_rate(rate: Decimal) -> Decimal {
    rate.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Derived pricing for one line. Never stored independently of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePricing {
    pub unit_vat: Decimal,
    pub unit_price_inc_vat: Decimal,
    pub line_total: Decimal,
}

/// Derive per-unit VAT, inclusive unit price and line total.
pub fn price_line(
    base_quantity: Decimal,
    unit_price_ex_vat: Decimal,
    vat_rate_percent: Decimal,
) -> LinePricing {
    let quantity = base_quantity.max(Decimal::ZERO);
    let ex = unit_price_ex_vat.max(Decimal::ZERO);
    let rate = clamp_rate(vat_rate_percent);

    let unit_vat = round_unit(ex * rate / Decimal::ONE_HUNDRED);
    let unit_price_inc_vat = round_unit(ex + unit_vat);
    let line_total = round_money(quantity * unit_price_inc_vat);

    LinePricing {
        unit_vat,
        unit_price_inc_vat,
        line_total,
    }
}

/// Back-solve the ex-VAT unit price from an inclusive entry. The ex-VAT
/// value remains the single source of truth; callers re-derive everything
/// from the returned figure and never store the inclusive entry as
/// authoritative.
pub fn ex_vat_from_inc(unit_price_inc_vat: Decimal, vat_rate_percent: Decimal) -> Decimal {
    let inc = unit_price_inc_vat.max(Decimal::ZERO);
    let rate = clamp_rate(vat_rate_percent);
    round_unit(inc / (Decimal::ONE + rate / Decimal::ONE_HUNDRED))
}
