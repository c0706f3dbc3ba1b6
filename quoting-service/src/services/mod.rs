//! Services module for quoting-service.

pub mod conversion;
pub mod editor;
pub mod interfaces;

pub use conversion::{convert_quotation, invoice_draft_from};
pub use editor::{DocumentEditor, WorkingDocument};
pub use interfaces::{
    ConversionReceipt, ConversionTarget, CustomerDirectory, DocumentStore, ProductCatalog,
};
