//! Shared fixtures for quoting-service tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::error::AppError;
use uuid::Uuid;

use quoting_service::config::EngineDefaults;
use quoting_service::models::{CatalogProduct, CreateDocument, CustomerProfile, Invoice, Quotation};
use quoting_service::services::{
    ConversionReceipt, ConversionTarget, CustomerDirectory, DocumentStore, ProductCatalog,
};

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("invalid decimal literal")
}

pub fn defaults() -> EngineDefaults {
    EngineDefaults::default()
}

pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn create_input(customer_name: &str) -> CreateDocument {
    CreateDocument {
        customer_id: Some(Uuid::new_v4()),
        customer_name: customer_name.to_string(),
        issue_date: issue_date(),
        notes: None,
    }
}

pub fn product(base_price_ex_vat: &str, units_per_container: i64) -> CatalogProduct {
    CatalogProduct {
        product_id: Uuid::new_v4(),
        display_code: "SKU-001".to_string(),
        display_name: "Test Product".to_string(),
        base_price_ex_vat: dec(base_price_ex_vat),
        default_units_per_container: Decimal::from(units_per_container),
    }
}

pub fn customer(default_discount_percent: &str, opening_balance: &str) -> CustomerProfile {
    CustomerProfile {
        customer_id: Uuid::new_v4(),
        name: "Seeded Customer".to_string(),
        default_discount_percent: dec(default_discount_percent),
        opening_balance: dec(opening_balance),
    }
}

/// In-memory product catalog.
#[derive(Default)]
pub struct MockCatalog {
    products: Mutex<HashMap<Uuid, CatalogProduct>>,
}

impl MockCatalog {
    pub fn with_product(product: &CatalogProduct) -> Self {
        let catalog = Self::default();
        catalog
            .products
            .lock()
            .unwrap()
            .insert(product.product_id, product.clone());
        catalog
    }
}

#[async_trait]
impl ProductCatalog for MockCatalog {
    async fn lookup_product(&self, product_id: Uuid) -> Result<Option<CatalogProduct>, AppError> {
        Ok(self.products.lock().unwrap().get(&product_id).cloned())
    }
}

/// In-memory customer directory.
#[derive(Default)]
pub struct MockDirectory {
    customers: Mutex<HashMap<Uuid, CustomerProfile>>,
}

impl MockDirectory {
    pub fn with_customer(profile: &CustomerProfile) -> Self {
        let directory = Self::default();
        directory
            .customers
            .lock()
            .unwrap()
            .insert(profile.customer_id, profile.clone());
        directory
    }
}

#[async_trait]
impl CustomerDirectory for MockDirectory {
    async fn lookup_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerProfile>, AppError> {
        Ok(self.customers.lock().unwrap().get(&customer_id).cloned())
    }
}

/// In-memory document store assigning sequential numbers.
#[derive(Default)]
pub struct MockStore {
    counter: AtomicU32,
    pub saved_quotations: Mutex<Vec<Quotation>>,
    pub saved_invoices: Mutex<Vec<Invoice>>,
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn save_quotation(&self, quotation: &Quotation) -> Result<String, AppError> {
        self.saved_quotations.lock().unwrap().push(quotation.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("QTN-{:04}", n))
    }

    async fn save_invoice(&self, invoice: &Invoice) -> Result<String, AppError> {
        self.saved_invoices.lock().unwrap().push(invoice.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("INV-{:04}", n))
    }
}

/// Document store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn save_quotation(&self, _quotation: &Quotation) -> Result<String, AppError> {
        Err(AppError::RemoteWriteError(anyhow::anyhow!(
            "document store unavailable"
        )))
    }

    async fn save_invoice(&self, _invoice: &Invoice) -> Result<String, AppError> {
        Err(AppError::RemoteWriteError(anyhow::anyhow!(
            "document store unavailable"
        )))
    }
}

/// Conversion target capturing every draft it is asked to create.
#[derive(Default)]
pub struct MockConversionTarget {
    pub invocations: AtomicU32,
    pub fail: bool,
    pub created: Mutex<Vec<Invoice>>,
}

impl MockConversionTarget {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn invocation_count(&self) -> u32 {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConversionTarget for MockConversionTarget {
    async fn create_invoice(&self, draft: &Invoice) -> Result<ConversionReceipt, AppError> {
        let n = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(AppError::RemoteWriteError(anyhow::anyhow!(
                "invoice creation failed"
            )));
        }
        self.created.lock().unwrap().push(draft.clone());
        Ok(ConversionReceipt {
            invoice_id: draft.body.document_id,
            invoice_number: format!("INV-{:04}", n),
        })
    }
}
