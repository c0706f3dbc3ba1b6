//! Quotation to invoice conversion.

use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::engine;
use crate::models::{Document, Invoice, InvoiceKind, Quotation, QuotationStatus};

use super::interfaces::{ConversionReceipt, ConversionTarget};

/// Build the fully resolved (post-discount, post-VAT) invoice draft for a
/// quotation. Lines are snapshotted with fresh identifiers, never shared, so
/// later edits to either document cannot cross-contaminate.
pub fn invoice_draft_from(quotation: &Quotation) -> Invoice {
    let src = &quotation.body;

    let mut body = Document::new(src.issue_date, src.vat_percent_default);
    body.customer_id = src.customer_id;
    body.customer_name = src.customer_name.clone();
    body.discount_percent = src.discount_percent;
    body.previous_balance = src.previous_balance;
    body.notes = src.notes.clone();
    body.metadata = src.metadata.clone();
    body.lines = src
        .lines
        .iter()
        .map(|line| {
            let mut line = line.clone();
            line.line_item_id = Uuid::new_v4();
            line
        })
        .collect();

    engine::recompute(&mut body);
    Invoice::new(body, InvoiceKind::Standard)
}

/// Convert a quotation into an invoice through the conversion target.
///
/// The target is invoked exactly once per attempt, and the source is marked
/// Converted only after the invoice is durably created; on failure the
/// quotation is left unchanged for an explicit user-directed retry.
#[instrument(skip(quotation, target), fields(quotation_id = %quotation.body.document_id))]
pub async fn convert_quotation(
    quotation: &mut Quotation,
    target: &dyn ConversionTarget,
) -> Result<ConversionReceipt, AppError> {
    if quotation.status == QuotationStatus::Converted {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Quotation is already converted"
        )));
    }
    if !quotation.status.can_transition_to(QuotationStatus::Converted) {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Quotation in status '{}' cannot be converted",
            quotation.status.as_str()
        )));
    }

    let draft = invoice_draft_from(quotation);
    let receipt = target.create_invoice(&draft).await?;

    quotation.status = QuotationStatus::Converted;
    quotation.converted_invoice_id = Some(receipt.invoice_id);

    info!(
        invoice_id = %receipt.invoice_id,
        invoice_number = %receipt.invoice_number,
        "Quotation converted"
    );

    Ok(receipt)
}
