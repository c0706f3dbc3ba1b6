//! Unit-of-measure model for quoting-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default bag weight in kilograms.
pub const DEFAULT_KG_PER_BAG: u32 = 25;

/// Unit of measure for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    Box,
    Pcs,
    Kg,
    Gram,
    Bag,
}

impl UnitOfMeasure {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOfMeasure::Box => "box",
            UnitOfMeasure::Pcs => "pcs",
            UnitOfMeasure::Kg => "kg",
            UnitOfMeasure::Gram => "gram",
            UnitOfMeasure::Bag => "bag",
        }
    }

    /// Unrecognized strings fail closed to `Box`.
    pub fn from_string(s: &str) -> Self {
        match s {
            "pcs" => UnitOfMeasure::Pcs,
            "kg" => UnitOfMeasure::Kg,
            "gram" => UnitOfMeasure::Gram,
            "bag" => UnitOfMeasure::Bag,
            _ => UnitOfMeasure::Box,
        }
    }
}

/// Per-unit quantity entry.
///
/// Each variant carries only the fields its unit actually uses;
/// [`QuantityInput::base_quantity`] funnels all of them into the one
/// canonical figure every pricing formula consumes. Grams are totalled in
/// kilograms; the raw gram entry stays in the variant for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "uom", rename_all = "snake_case")]
pub enum QuantityInput {
    Box {
        raw: Decimal,
        units_per_box: Decimal,
    },
    Pcs {
        raw: Decimal,
    },
    Kg {
        raw: Decimal,
    },
    Gram {
        raw: Decimal,
    },
    Bag {
        raw: Decimal,
        kg_per_bag: Decimal,
    },
}

/// Clamp interactive numeric entry: negative values coerce to zero.
pub fn sanitize_quantity(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Container sizes (units per box) must be at least one.
fn sanitize_units_per_box(value: Decimal) -> Decimal {
    value.max(Decimal::ONE)
}

impl QuantityInput {
    /// Zeroed entry for a unit, with that unit's container default seeded.
    /// `units_per_box_default` comes from the bound product's catalog record
    /// (1 for placeholder lines); `kg_per_bag_default` from engine config.
    pub fn for_unit(
        uom: UnitOfMeasure,
        units_per_box_default: Decimal,
        kg_per_bag_default: Decimal,
    ) -> Self {
        match uom {
            UnitOfMeasure::Box => QuantityInput::Box {
                raw: Decimal::ZERO,
                units_per_box: sanitize_units_per_box(units_per_box_default),
            },
            UnitOfMeasure::Pcs => QuantityInput::Pcs { raw: Decimal::ZERO },
            UnitOfMeasure::Kg => QuantityInput::Kg { raw: Decimal::ZERO },
            UnitOfMeasure::Gram => QuantityInput::Gram { raw: Decimal::ZERO },
            UnitOfMeasure::Bag => QuantityInput::Bag {
                raw: Decimal::ZERO,
                kg_per_bag: sanitize_quantity(kg_per_bag_default),
            },
        }
    }

    pub fn unit(&self) -> UnitOfMeasure {
        match self {
            QuantityInput::Box { .. } => UnitOfMeasure::Box,
            QuantityInput::Pcs { .. } => UnitOfMeasure::Pcs,
            QuantityInput::Kg { .. } => UnitOfMeasure::Kg,
            QuantityInput::Gram { .. } => UnitOfMeasure::Gram,
            QuantityInput::Bag { .. } => UnitOfMeasure::Bag,
        }
    }

    /// Replace the raw quantity, clamped to >= 0.
    pub fn with_raw(self, value: Decimal) -> Self {
        let value = sanitize_quantity(value);
        match self {
            QuantityInput::Box { units_per_box, .. } => QuantityInput::Box {
                raw: value,
                units_per_box,
            },
            QuantityInput::Pcs { .. } => QuantityInput::Pcs { raw: value },
            QuantityInput::Kg { .. } => QuantityInput::Kg { raw: value },
            QuantityInput::Gram { .. } => QuantityInput::Gram { raw: value },
            QuantityInput::Bag { kg_per_bag, .. } => QuantityInput::Bag {
                raw: value,
                kg_per_bag,
            },
        }
    }

    /// Replace the container size (units per box, kg per bag). No-op for
    /// units without a container field.
    pub fn with_container(self, value: Decimal) -> Self {
        match self {
            QuantityInput::Box { raw, .. } => QuantityInput::Box {
                raw,
                units_per_box: sanitize_units_per_box(value),
            },
            QuantityInput::Bag { raw, .. } => QuantityInput::Bag {
                raw,
                kg_per_bag: sanitize_quantity(value),
            },
            other => other,
        }
    }

    /// Canonical base quantity used by all pricing formulas.
    pub fn base_quantity(&self) -> Decimal {
        match self {
            QuantityInput::Box { raw, units_per_box } => raw * units_per_box,
            QuantityInput::Pcs { raw } => *raw,
            QuantityInput::Kg { raw } => *raw,
            QuantityInput::Gram { raw } => raw / Decimal::ONE_THOUSAND,
            QuantityInput::Bag { raw, kg_per_bag } => raw * kg_per_bag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_multiplies_units_per_box() {
        let q = QuantityInput::Box {
            raw: Decimal::from(5),
            units_per_box: Decimal::from(12),
        };
        assert_eq!(q.base_quantity(), Decimal::from(60));
    }

    #[test]
    fn gram_totals_in_kilograms() {
        let q = QuantityInput::Gram {
            raw: Decimal::from(1500),
        };
        assert_eq!(q.base_quantity(), Decimal::new(15, 1));
    }

    #[test]
    fn bag_multiplies_bag_weight() {
        let q = QuantityInput::for_unit(
            UnitOfMeasure::Bag,
            Decimal::ONE,
            Decimal::from(DEFAULT_KG_PER_BAG),
        )
        .with_raw(Decimal::from(2));
        assert_eq!(q.base_quantity(), Decimal::from(50));
    }

    #[test]
    fn negative_raw_clamps_to_zero() {
        let q = QuantityInput::Pcs { raw: Decimal::ZERO }.with_raw(Decimal::from(-3));
        assert_eq!(q.base_quantity(), Decimal::ZERO);
    }

    #[test]
    fn units_per_box_floor_is_one() {
        let q = QuantityInput::Box {
            raw: Decimal::ONE,
            units_per_box: Decimal::ONE,
        }
        .with_container(Decimal::ZERO);
        assert_eq!(q.base_quantity(), Decimal::ONE);
    }

    #[test]
    fn unknown_uom_string_falls_back_to_box() {
        assert_eq!(UnitOfMeasure::from_string("crate"), UnitOfMeasure::Box);
        assert_eq!(UnitOfMeasure::from_string("kg"), UnitOfMeasure::Kg);
    }
}
