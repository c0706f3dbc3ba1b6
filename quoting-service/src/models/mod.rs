//! Domain models for quoting-service.

mod document;
mod line_item;
mod party;
mod payment;
mod status;
mod uom;

pub use document::{
    CreateDocument, Document, Invoice, InvoiceKind, PaidAuthority, Quotation,
};
pub use line_item::LineItem;
pub use party::{CatalogProduct, CustomerProfile};
pub use payment::{PaymentRecord, RecordPayment};
pub use status::{InvoiceStatus, QuotationStatus};
pub use uom::{sanitize_quantity, QuantityInput, UnitOfMeasure, DEFAULT_KG_PER_BAG};
