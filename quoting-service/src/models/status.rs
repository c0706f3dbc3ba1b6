//! Document status state machines for quoting-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quotation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Cancelled,
    Converted,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Cancelled => "cancelled",
            QuotationStatus::Converted => "converted",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => QuotationStatus::Sent,
            "accepted" => QuotationStatus::Accepted,
            "rejected" => QuotationStatus::Rejected,
            "cancelled" => QuotationStatus::Cancelled,
            "converted" => QuotationStatus::Converted,
            _ => QuotationStatus::Draft,
        }
    }

    /// Rejected, Cancelled and Converted accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuotationStatus::Rejected | QuotationStatus::Cancelled | QuotationStatus::Converted
        )
    }

    /// Legal transitions: Draft -> Sent -> {Accepted, Rejected}; any of
    /// {Draft, Sent, Accepted} -> Cancelled or Converted.
    pub fn can_transition_to(&self, next: QuotationStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            QuotationStatus::Draft => false,
            QuotationStatus::Sent => *self == QuotationStatus::Draft,
            QuotationStatus::Accepted | QuotationStatus::Rejected => *self == QuotationStatus::Sent,
            QuotationStatus::Cancelled | QuotationStatus::Converted => matches!(
                self,
                QuotationStatus::Draft | QuotationStatus::Sent | QuotationStatus::Accepted
            ),
        }
    }
}

/// Invoice lifecycle. Issued/PartiallyPaid/Paid are derived from the
/// reconciled amounts; Void is an explicit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Issued,
    PartiallyPaid,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "partially_paid" => InvoiceStatus::PartiallyPaid,
            "paid" => InvoiceStatus::Paid,
            "void" => InvoiceStatus::Void,
            _ => InvoiceStatus::Issued,
        }
    }

    /// Payment status derived from reconciled amounts. Void invoices never
    /// re-derive.
    pub fn from_amounts(gross_total: Decimal, amount_paid: Decimal) -> Self {
        if amount_paid <= Decimal::ZERO {
            InvoiceStatus::Issued
        } else if amount_paid < gross_total {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Paid
        }
    }
}
