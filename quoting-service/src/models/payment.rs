//! Payment record model for quoting-service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payment recorded against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub payment_date: NaiveDate,
}

/// Input for recording a payment.
#[derive(Debug, Clone, Validate)]
pub struct RecordPayment {
    pub amount: Decimal,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub payment_date: NaiveDate,
}
