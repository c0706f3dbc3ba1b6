//! External collaborator boundaries for quoting-service.
//!
//! The engine core never performs I/O; these traits are the only seams to
//! the catalog, customer registry, persistence and the conversion target.
//! No wire format is prescribed; monetary fields are `Decimal` end to end.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{CatalogProduct, CustomerProfile, Invoice, Quotation};

/// Product catalog lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn lookup_product(&self, product_id: Uuid) -> Result<Option<CatalogProduct>, AppError>;
}

/// Customer registry lookup. Consulted only when a customer is selected on a
/// document; the returned defaults seed the working copy once.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn lookup_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerProfile>, AppError>;
}

/// Persistence boundary. Accepts a fully resolved snapshot (derived fields
/// included, not recomputed downstream) and returns the assigned document
/// number.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save_quotation(&self, quotation: &Quotation) -> Result<String, AppError>;
    async fn save_invoice(&self, invoice: &Invoice) -> Result<String, AppError>;
}

/// Identifiers of the invoice created from a quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReceipt {
    pub invoice_id: Uuid,
    pub invoice_number: String,
}

/// Conversion target creator. Invoked exactly once per successful conversion
/// attempt; a failure is surfaced with no automatic retry, since the remote
/// write may have partially succeeded.
#[async_trait]
pub trait ConversionTarget: Send + Sync {
    async fn create_invoice(&self, draft: &Invoice) -> Result<ConversionReceipt, AppError>;
}
