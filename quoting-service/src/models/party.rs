//! Catalog and customer boundary records for quoting-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product record returned by the catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub product_id: Uuid,
    pub display_code: String,
    pub display_name: String,
    pub base_price_ex_vat: Decimal,
    pub default_units_per_container: Decimal,
}

/// Customer record returned by the directory lookup. Used only to seed a new
/// document's discount percent and previous balance on customer selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: Uuid,
    pub name: String,
    pub default_discount_percent: Decimal,
    pub opening_balance: Decimal,
}
