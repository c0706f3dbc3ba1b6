//! Working-copy document editor.
//!
//! Every screen mutation for both document types funnels through this one
//! surface, and each mutation ends with a single engine recompute pass over
//! the working copy. Nothing touches persistence until an explicit `save`;
//! discarding the editor discards the edit with no cleanup.

use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::config::EngineDefaults;
use crate::engine::{self, balance, pricing};
use crate::models::{
    CatalogProduct, CreateDocument, CustomerProfile, Document, Invoice, InvoiceKind,
    InvoiceStatus, LineItem, PaidAuthority, PaymentRecord, QuantityInput, Quotation,
    QuotationStatus, RecordPayment, UnitOfMeasure,
};

use super::conversion;
use super::interfaces::{ConversionReceipt, ConversionTarget, DocumentStore};

/// The document under edit.
#[derive(Debug, Clone)]
pub enum WorkingDocument {
    Quotation(Quotation),
    Invoice(Invoice),
}

/// In-memory working copy of one open document. Single-threaded and
/// synchronous except for `save` and `convert_to_invoice`, the only remote
/// writes; both are guarded by one in-flight flag and never retried
/// automatically.
#[derive(Debug)]
pub struct DocumentEditor {
    doc: WorkingDocument,
    defaults: EngineDefaults,
    discount_edited: bool,
    previous_balance_edited: bool,
    write_in_flight: bool,
    next_sort_order: i32,
}

impl DocumentEditor {
    /// Open a working copy for a new quotation.
    pub fn new_quotation(
        input: CreateDocument,
        defaults: EngineDefaults,
    ) -> Result<Self, AppError> {
        input.validate()?;
        let body = Self::new_body(&input, &defaults);
        Ok(Self::from_working(
            WorkingDocument::Quotation(Quotation::new(body)),
            defaults,
        ))
    }

    /// Open a working copy for a new invoice.
    pub fn new_invoice(
        input: CreateDocument,
        kind: InvoiceKind,
        defaults: EngineDefaults,
    ) -> Result<Self, AppError> {
        input.validate()?;
        let body = Self::new_body(&input, &defaults);
        Ok(Self::from_working(
            WorkingDocument::Invoice(Invoice::new(body, kind)),
            defaults,
        ))
    }

    /// Resume editing an existing document.
    pub fn open(doc: WorkingDocument, defaults: EngineDefaults) -> Self {
        let next_sort_order = match &doc {
            WorkingDocument::Quotation(q) => q.body.lines.len() as i32,
            WorkingDocument::Invoice(i) => i.body.lines.len() as i32,
        };
        let mut editor = Self {
            doc,
            defaults,
            // resumed documents keep whatever was saved; defaults never
            // silently reapply
            discount_edited: true,
            previous_balance_edited: true,
            write_in_flight: false,
            next_sort_order,
        };
        editor.after_mutation();
        editor
    }

    fn new_body(input: &CreateDocument, defaults: &EngineDefaults) -> Document {
        let mut body = Document::new(input.issue_date, defaults.vat_percent);
        body.customer_id = input.customer_id;
        body.customer_name = input.customer_name.clone();
        body.notes = input.notes.clone();
        body
    }

    fn from_working(doc: WorkingDocument, defaults: EngineDefaults) -> Self {
        Self {
            doc,
            defaults,
            discount_edited: false,
            previous_balance_edited: false,
            write_in_flight: false,
            next_sort_order: 0,
        }
    }

    pub fn working(&self) -> &WorkingDocument {
        &self.doc
    }

    pub fn document(&self) -> &Document {
        match &self.doc {
            WorkingDocument::Quotation(q) => &q.body,
            WorkingDocument::Invoice(i) => &i.body,
        }
    }

    pub fn quotation(&self) -> Option<&Quotation> {
        match &self.doc {
            WorkingDocument::Quotation(q) => Some(q),
            WorkingDocument::Invoice(_) => None,
        }
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        match &self.doc {
            WorkingDocument::Invoice(i) => Some(i),
            WorkingDocument::Quotation(_) => None,
        }
    }

    fn body_mut(&mut self) -> &mut Document {
        match &mut self.doc {
            WorkingDocument::Quotation(q) => &mut q.body,
            WorkingDocument::Invoice(i) => &mut i.body,
        }
    }

    fn line_mut(&mut self, line_item_id: Uuid) -> Result<&mut LineItem, AppError> {
        self.body_mut()
            .lines
            .iter_mut()
            .find(|l| l.line_item_id == line_item_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Line item not found")))
    }

    fn ensure_editable(&self) -> Result<(), AppError> {
        match &self.doc {
            WorkingDocument::Quotation(q) if q.status != QuotationStatus::Draft => {
                Err(AppError::BadRequest(anyhow::anyhow!(
                    "Can only edit draft quotations"
                )))
            }
            WorkingDocument::Invoice(i) if i.status == InvoiceStatus::Void => Err(
                AppError::BadRequest(anyhow::anyhow!("Void invoices cannot be edited")),
            ),
            _ => Ok(()),
        }
    }

    /// Single recompute pass after any mutation. Referentially transparent:
    /// batched edits followed by one pass land on the same figures as a pass
    /// per edit.
    fn after_mutation(&mut self) {
        engine::recompute(self.body_mut());
        if let WorkingDocument::Invoice(invoice) = &mut self.doc {
            if invoice.status != InvoiceStatus::Void {
                invoice.status =
                    InvoiceStatus::from_amounts(invoice.body.gross_total(), invoice.body.amount_paid);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------------

    /// Seed the document from a selected customer. The profile defaults for
    /// discount and carried-over balance apply only while the operator has
    /// not edited those fields; once edited they are never reapplied.
    pub fn select_customer(&mut self, profile: &CustomerProfile) -> Result<(), AppError> {
        self.ensure_editable()?;
        let discount_edited = self.discount_edited;
        let previous_balance_edited = self.previous_balance_edited;

        let body = self.body_mut();
        body.customer_id = Some(profile.customer_id);
        body.customer_name = profile.name.clone();
        if !discount_edited {
            body.discount_percent = pricing::clamp_rate(profile.default_discount_percent);
        }
        if !previous_balance_edited {
            body.previous_balance = pricing::round_money(profile.opening_balance);
        }
        self.after_mutation();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Line Items
    // -------------------------------------------------------------------------

    /// Append a placeholder line at the document's default VAT rate.
    pub fn add_line(&mut self) -> Result<Uuid, AppError> {
        self.ensure_editable()?;
        let sort_order = self.next_sort_order;
        self.next_sort_order += 1;

        let defaults = self.defaults;
        let body = self.body_mut();
        let line = LineItem::placeholder(body.vat_percent_default, defaults.kg_per_bag, sort_order);
        let line_item_id = line.line_item_id;
        body.lines.push(line);
        self.after_mutation();
        Ok(line_item_id)
    }

    pub fn remove_line(&mut self, line_item_id: Uuid) -> Result<(), AppError> {
        self.ensure_editable()?;
        let body = self.body_mut();
        let before = body.lines.len();
        body.lines.retain(|l| l.line_item_id != line_item_id);
        if body.lines.len() == before {
            return Err(AppError::NotFound(anyhow::anyhow!("Line item not found")));
        }
        self.after_mutation();
        Ok(())
    }

    /// Bind a catalog product to a line. Captures the undiscounted catalog
    /// price, re-enables discount tracking and re-derives the Box container
    /// default.
    pub fn bind_product(
        &mut self,
        line_item_id: Uuid,
        product: &CatalogProduct,
    ) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.product_id = Some(product.product_id);
        line.description = product.display_name.clone();
        line.catalog_price_ex_vat = Some(product.base_price_ex_vat.max(Decimal::ZERO));
        line.default_units_per_box = product.default_units_per_container.max(Decimal::ONE);
        line.price_overridden = false;
        if line.quantity.unit() == UnitOfMeasure::Box {
            line.quantity = line.quantity.with_container(line.default_units_per_box);
        }
        self.after_mutation();
        Ok(())
    }

    /// Switch a line's unit of measure. The previous unit's quantity fields
    /// reset and the new unit's container default is re-derived.
    pub fn set_uom(&mut self, line_item_id: Uuid, uom: UnitOfMeasure) -> Result<(), AppError> {
        self.ensure_editable()?;
        let kg_per_bag = self.defaults.kg_per_bag;
        let line = self.line_mut(line_item_id)?;
        line.quantity = QuantityInput::for_unit(uom, line.default_units_per_box, kg_per_bag);
        self.after_mutation();
        Ok(())
    }

    pub fn set_raw_quantity(&mut self, line_item_id: Uuid, value: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.quantity = line.quantity.with_raw(value);
        self.after_mutation();
        Ok(())
    }

    /// Set the container size of the line's current unit (units per box, kg
    /// per bag).
    pub fn set_container_size(
        &mut self,
        line_item_id: Uuid,
        value: Decimal,
    ) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.quantity = line.quantity.with_container(value);
        self.after_mutation();
        Ok(())
    }

    /// Manual ex-VAT price edit; marks the line overridden so discount
    /// propagation leaves it alone until its product binding changes.
    pub fn set_unit_price_ex_vat(
        &mut self,
        line_item_id: Uuid,
        price: Decimal,
    ) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.unit_price_ex_vat = pricing::round_unit(price.max(Decimal::ZERO));
        line.price_overridden = true;
        self.after_mutation();
        Ok(())
    }

    /// Manual VAT-inclusive price edit. Back-solves the ex-VAT price, which
    /// stays the single source of truth; the inclusive entry itself is never
    /// stored.
    pub fn set_unit_price_inc_vat(
        &mut self,
        line_item_id: Uuid,
        price: Decimal,
    ) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.unit_price_ex_vat = pricing::ex_vat_from_inc(price, line.vat_rate_percent);
        line.price_overridden = true;
        self.after_mutation();
        Ok(())
    }

    /// Per-line VAT rate edit; the line stops tracking the document default.
    pub fn set_line_vat_rate(&mut self, line_item_id: Uuid, rate: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        let line = self.line_mut(line_item_id)?;
        line.vat_rate_percent = pricing::clamp_rate(rate);
        line.tracks_default_vat = false;
        self.after_mutation();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Document-level fields
    // -------------------------------------------------------------------------

    pub fn set_discount_percent(&mut self, percent: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        self.discount_edited = true;
        self.body_mut().discount_percent = pricing::clamp_rate(percent);
        self.after_mutation();
        Ok(())
    }

    /// Change the document's default VAT percent. Explicit propagation: the
    /// rate is pushed onto every line still tracking the default in this one
    /// pass.
    pub fn set_vat_percent_default(&mut self, percent: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        let rate = pricing::clamp_rate(percent);
        let body = self.body_mut();
        body.vat_percent_default = rate;
        for line in body.lines.iter_mut().filter(|l| l.tracks_default_vat) {
            line.vat_rate_percent = rate;
        }
        self.after_mutation();
        Ok(())
    }

    pub fn set_previous_balance(&mut self, amount: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        self.previous_balance_edited = true;
        self.body_mut().previous_balance = pricing::round_money(amount);
        self.after_mutation();
        Ok(())
    }

    /// Explicit amount-paid edit; amount-paid becomes the authoritative side
    /// of the reconciliation pair.
    pub fn edit_amount_paid(&mut self, amount: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        balance::edit_amount_paid(self.body_mut(), amount);
        self.after_mutation();
        Ok(())
    }

    /// Explicit balance edit; the remaining balance becomes the
    /// authoritative side until amount-paid is edited again.
    pub fn edit_balance_remaining(&mut self, amount: Decimal) -> Result<(), AppError> {
        self.ensure_editable()?;
        balance::edit_balance_remaining(self.body_mut(), amount);
        self.after_mutation();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Payments
    // -------------------------------------------------------------------------

    /// Record a payment against an invoice. The payment accumulates into
    /// amount-paid with amount-paid authority.
    #[instrument(skip(self, input), fields(document_id = %self.document().document_id))]
    pub fn record_payment(&mut self, input: RecordPayment) -> Result<Uuid, AppError> {
        input.validate()?;
        let invoice = match &mut self.doc {
            WorkingDocument::Invoice(i) => i,
            WorkingDocument::Quotation(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Payments can only be recorded against invoices"
                )))
            }
        };
        if invoice.status == InvoiceStatus::Void {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Cannot record payments against a void invoice"
            )));
        }

        let amount = pricing::round_money(input.amount);
        if amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment amount must be positive"
            )));
        }
        if amount > invoice.body.balance_remaining {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment amount {} exceeds outstanding balance {}",
                amount,
                invoice.body.balance_remaining
            )));
        }

        let payment = PaymentRecord {
            payment_id: Uuid::new_v4(),
            amount,
            payment_method: input.payment_method,
            payment_reference: input.payment_reference,
            payment_date: input.payment_date,
        };
        let payment_id = payment.payment_id;
        invoice.payments.push(payment);
        invoice.body.amount_paid += amount;
        invoice.body.paid_authority = PaidAuthority::AmountPaid;
        self.after_mutation();

        info!(payment_id = %payment_id, amount = %amount, "Payment recorded");

        Ok(payment_id)
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    /// Explicit quotation status update. Conversion is not reachable here;
    /// it has its own operation.
    pub fn update_quotation_status(&mut self, next: QuotationStatus) -> Result<(), AppError> {
        let quotation = match &mut self.doc {
            WorkingDocument::Quotation(q) => q,
            WorkingDocument::Invoice(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Status updates apply to quotations"
                )))
            }
        };
        if next == QuotationStatus::Converted {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Conversion goes through the conversion operation"
            )));
        }
        if !quotation.status.can_transition_to(next) {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Cannot move quotation from '{}' to '{}'",
                quotation.status.as_str(),
                next.as_str()
            )));
        }
        info!(
            from = quotation.status.as_str(),
            to = next.as_str(),
            "Quotation status updated"
        );
        quotation.status = next;
        Ok(())
    }

    /// Void an invoice. Valid only while it is not fully paid.
    pub fn void_invoice(&mut self) -> Result<(), AppError> {
        let invoice = match &mut self.doc {
            WorkingDocument::Invoice(i) => i,
            WorkingDocument::Quotation(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Only invoices can be voided"
                )))
            }
        };
        match invoice.status {
            InvoiceStatus::Issued | InvoiceStatus::PartiallyPaid => {
                invoice.status = InvoiceStatus::Void;
                info!(document_id = %invoice.body.document_id, "Invoice voided");
                Ok(())
            }
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "Only unpaid or partially paid invoices can be voided"
            ))),
        }
    }

    // -------------------------------------------------------------------------
    // Remote writes
    // -------------------------------------------------------------------------

    /// Commit the resolved working copy through the document store. A failed
    /// save is surfaced for explicit user-directed retry; it is never
    /// resubmitted automatically, since the write may have partially
    /// succeeded.
    #[instrument(skip(self, store), fields(document_id = %self.document().document_id))]
    pub async fn save(&mut self, store: &dyn DocumentStore) -> Result<String, AppError> {
        if self.write_in_flight {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "A remote write is already outstanding for this document"
            )));
        }
        balance::check_reconciled(self.document())?;

        self.write_in_flight = true;
        let result = match &self.doc {
            WorkingDocument::Quotation(q) => store.save_quotation(q).await,
            WorkingDocument::Invoice(i) => store.save_invoice(i).await,
        };
        self.write_in_flight = false;

        let number = result?;
        self.body_mut().document_number = Some(number.clone());
        info!(document_number = %number, "Document saved");
        Ok(number)
    }

    /// Convert the quotation under edit into an invoice. Shares the
    /// remote-write guard with `save`.
    #[instrument(skip(self, target), fields(document_id = %self.document().document_id))]
    pub async fn convert_to_invoice(
        &mut self,
        target: &dyn ConversionTarget,
    ) -> Result<ConversionReceipt, AppError> {
        if self.write_in_flight {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "A remote write is already outstanding for this document"
            )));
        }
        self.write_in_flight = true;
        let result = match &mut self.doc {
            WorkingDocument::Quotation(q) => conversion::convert_quotation(q, target).await,
            WorkingDocument::Invoice(_) => Err(AppError::BadRequest(anyhow::anyhow!(
                "Only quotations can be converted"
            ))),
        };
        self.write_in_flight = false;
        result
    }
}
