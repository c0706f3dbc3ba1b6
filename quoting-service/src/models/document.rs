//! Document models for quoting-service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::line_item::LineItem;
use super::payment::PaymentRecord;
use super::status::{InvoiceStatus, QuotationStatus};

/// Which side of the paid/balance pair the operator touched last. That side
/// is held fixed when the gross total shifts; the other is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaidAuthority {
    #[default]
    AmountPaid,
    BalanceRemaining,
}

/// Invoice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    Standard,
    CreditNote,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceKind::Standard => "standard",
            InvoiceKind::CreditNote => "credit_note",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "credit_note" => InvoiceKind::CreditNote,
            _ => InvoiceKind::Standard,
        }
    }
}

/// Shared body of a quotation or invoice.
///
/// `discount_amount`, `subtotal`, `vat_amount`, `total_amount`,
/// `balance_remaining` (or `amount_paid`, depending on `paid_authority`) are
/// derived; the engine recomputes them fresh from the live line array on
/// every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_id: Uuid,
    /// Assigned by the document store on save.
    pub document_number: Option<String>,
    pub issue_date: NaiveDate,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub lines: Vec<LineItem>,
    pub vat_percent_default: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
    pub previous_balance: Decimal,
    pub amount_paid: Decimal,
    pub balance_remaining: Decimal,
    pub paid_authority: PaidAuthority,
    pub notes: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl Document {
    pub fn new(issue_date: NaiveDate, vat_percent_default: Decimal) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            document_number: None,
            issue_date,
            customer_id: None,
            customer_name: String::new(),
            lines: Vec::new(),
            vat_percent_default,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            previous_balance: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            balance_remaining: Decimal::ZERO,
            paid_authority: PaidAuthority::default(),
            notes: None,
            metadata: None,
        }
    }

    /// Total due inclusive of any carried-over balance.
    pub fn gross_total(&self) -> Decimal {
        self.total_amount + self.previous_balance
    }
}

/// Quotation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub body: Document,
    pub status: QuotationStatus,
    pub converted_invoice_id: Option<Uuid>,
}

impl Quotation {
    pub fn new(body: Document) -> Self {
        Self {
            body,
            status: QuotationStatus::Draft,
            converted_invoice_id: None,
        }
    }
}

/// Invoice document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub body: Document,
    pub kind: InvoiceKind,
    pub status: InvoiceStatus,
    pub payments: Vec<PaymentRecord>,
}

impl Invoice {
    pub fn new(body: Document, kind: InvoiceKind) -> Self {
        Self {
            body,
            kind,
            status: InvoiceStatus::Issued,
            payments: Vec::new(),
        }
    }
}

/// Input for opening a new document working copy.
#[derive(Debug, Clone, Validate)]
pub struct CreateDocument {
    pub customer_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub issue_date: NaiveDate,
    pub notes: Option<String>,
}
