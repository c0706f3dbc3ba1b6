//! Line item model for quoting-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::uom::{QuantityInput, UnitOfMeasure};

/// Line item on a quotation or invoice.
///
/// `base_quantity`, `unit_vat`, `unit_price_inc_vat` and `line_total` are
/// derived: the engine recomputes them from `{quantity, unit_price_ex_vat,
/// vat_rate_percent}` on every pass and nothing else writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: QuantityInput,
    pub base_quantity: Decimal,
    pub unit_price_ex_vat: Decimal,
    pub unit_vat: Decimal,
    pub unit_price_inc_vat: Decimal,
    pub vat_rate_percent: Decimal,
    /// Line still follows the document's default VAT percent; cleared by an
    /// explicit per-line rate edit.
    pub tracks_default_vat: bool,
    pub line_total: Decimal,
    /// Manually priced; document-level discount propagation skips the line
    /// until its product binding changes.
    pub price_overridden: bool,
    /// Undiscounted catalog price captured at bind time; the discount rule
    /// rewrites `unit_price_ex_vat` from this, never from itself.
    pub catalog_price_ex_vat: Option<Decimal>,
    /// Catalog container default, re-applied when the line switches to Box.
    pub default_units_per_box: Decimal,
    pub sort_order: i32,
}

impl LineItem {
    /// Fresh placeholder line (no product bound) at the document's default
    /// VAT rate.
    pub fn placeholder(default_vat_percent: Decimal, kg_per_bag: Decimal, sort_order: i32) -> Self {
        Self {
            line_item_id: Uuid::new_v4(),
            product_id: None,
            description: String::new(),
            quantity: QuantityInput::for_unit(UnitOfMeasure::Box, Decimal::ONE, kg_per_bag),
            base_quantity: Decimal::ZERO,
            unit_price_ex_vat: Decimal::ZERO,
            unit_vat: Decimal::ZERO,
            unit_price_inc_vat: Decimal::ZERO,
            vat_rate_percent: default_vat_percent,
            tracks_default_vat: true,
            line_total: Decimal::ZERO,
            price_overridden: false,
            catalog_price_ex_vat: None,
            default_units_per_box: Decimal::ONE,
            sort_order,
        }
    }

    /// A real line is bound to a catalog product; placeholder lines are
    /// excluded from document totals.
    pub fn is_real(&self) -> bool {
        self.product_id.is_some()
    }
}
