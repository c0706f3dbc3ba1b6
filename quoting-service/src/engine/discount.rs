//! Document-level discount propagation.

use rust_decimal::Decimal;

use crate::models::LineItem;

use super::pricing::{clamp_rate, price_line, round_money, round_unit};

/// Effective ex-VAT unit price for a catalog base price under a document
/// discount. Discount applies before VAT; VAT re-derives from the
/// discounted base.
pub fn discounted_unit_price(base_price_ex_vat: Decimal, discount_percent: Decimal) -> Decimal {
    let base = base_price_ex_vat.max(Decimal::ZERO);
    let pct = clamp_rate(discount_percent);
    round_unit(base * (Decimal::ONE - pct / Decimal::ONE_HUNDRED))
}

/// Rewrite eligible lines' ex-VAT price from their captured catalog base.
/// Overridden lines and placeholder lines are never touched, so an operator
/// can hand-price specific items while the rest track the global discount.
pub fn propagate_discount(lines: &mut [LineItem], discount_percent: Decimal) {
    for line in lines.iter_mut() {
        if !line.is_real() || line.price_overridden {
            continue;
        }
        if let Some(base) = line.catalog_price_ex_vat {
            line.unit_price_ex_vat = discounted_unit_price(base, discount_percent);
        }
    }
}

/// Informational document discount: the actual delta between undiscounted
/// and current inclusive pricing over real lines. Overridden lines and
/// per-line VAT differences make this diverge from
/// `discount_percent x subtotal`, so it is computed as a delta, never as a
/// percentage.
pub fn discount_delta(lines: &[LineItem]) -> Decimal {
    let mut delta = Decimal::ZERO;
    for line in lines.iter().filter(|l| l.is_real()) {
        if let Some(base) = line.catalog_price_ex_vat {
            let undiscounted = price_line(line.base_quantity, base, line.vat_rate_percent);
            delta +=
                line.base_quantity * (undiscounted.unit_price_inc_vat - line.unit_price_inc_vat);
        }
    }
    round_money(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_off_catalog_hundred() {
        let effective = discounted_unit_price(Decimal::from(100), Decimal::from(10));
        assert_eq!(effective, Decimal::from(90));
    }

    #[test]
    fn discount_percent_clamps_to_range() {
        assert_eq!(
            discounted_unit_price(Decimal::from(100), Decimal::from(150)),
            Decimal::ZERO
        );
        assert_eq!(
            discounted_unit_price(Decimal::from(100), Decimal::from(-5)),
            Decimal::from(100)
        );
    }
}
