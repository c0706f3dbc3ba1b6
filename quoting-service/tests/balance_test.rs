//! Balance reconciliation tests for quoting-service.

mod common;

use common::{create_input, dec, defaults, product};
use quoting_service::engine::balance;
use quoting_service::models::InvoiceKind;
use quoting_service::services::DocumentEditor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Invoice editor with a gross total of 1000.00 (no VAT, no carry-over).
fn invoice_with_gross_1000() -> (DocumentEditor, Uuid) {
    let mut editor = DocumentEditor::new_invoice(
        create_input("Balance Customer"),
        InvoiceKind::Standard,
        defaults(),
    )
    .unwrap();
    editor.set_vat_percent_default(dec("0")).unwrap();
    let line_id = editor.add_line().unwrap();
    editor.bind_product(line_id, &product("100.00", 1)).unwrap();
    editor.set_raw_quantity(line_id, dec("10")).unwrap();
    assert_eq!(editor.document().gross_total(), dec("1000.00"));
    (editor, line_id)
}

#[test]
fn paid_edit_derives_balance() {
    let (mut editor, _) = invoice_with_gross_1000();
    editor.edit_amount_paid(dec("400")).unwrap();

    assert_eq!(editor.document().balance_remaining, dec("600.00"));
    balance::check_reconciled(editor.document()).unwrap();
}

#[test]
fn balance_edit_derives_paid() {
    let (mut editor, _) = invoice_with_gross_1000();
    editor.edit_amount_paid(dec("400")).unwrap();
    editor.edit_balance_remaining(dec("250")).unwrap();

    assert_eq!(editor.document().amount_paid, dec("750.00"));
    balance::check_reconciled(editor.document()).unwrap();
}

#[test]
fn last_touched_side_survives_line_edits() {
    let (mut editor, line_id) = invoice_with_gross_1000();
    editor.edit_balance_remaining(dec("300")).unwrap();
    assert_eq!(editor.document().amount_paid, dec("700.00"));

    // gross total moves to 1200; the balance entry stays authoritative
    editor.set_raw_quantity(line_id, dec("12")).unwrap();
    assert_eq!(editor.document().balance_remaining, dec("300.00"));
    assert_eq!(editor.document().amount_paid, dec("900.00"));

    // an amount-paid edit takes authority back
    editor.edit_amount_paid(dec("200")).unwrap();
    editor.set_raw_quantity(line_id, dec("10")).unwrap();
    assert_eq!(editor.document().amount_paid, dec("200.00"));
    assert_eq!(editor.document().balance_remaining, dec("800.00"));
    balance::check_reconciled(editor.document()).unwrap();
}

#[test]
fn previous_balance_feeds_gross_total() {
    let (mut editor, _) = invoice_with_gross_1000();
    editor.set_previous_balance(dec("150")).unwrap();

    assert_eq!(editor.document().gross_total(), dec("1150.00"));
    assert_eq!(editor.document().balance_remaining, dec("1150.00"));

    editor.edit_amount_paid(dec("1000")).unwrap();
    assert_eq!(editor.document().balance_remaining, dec("150.00"));
    balance::check_reconciled(editor.document()).unwrap();
}

#[test]
fn overpayment_clamps_balance_at_zero() {
    let (mut editor, _) = invoice_with_gross_1000();
    editor.edit_amount_paid(dec("1400")).unwrap();

    assert_eq!(editor.document().balance_remaining, Decimal::ZERO);
}

#[test]
fn reconciliation_holds_across_edit_sequences() {
    let (mut editor, line_id) = invoice_with_gross_1000();

    editor.edit_amount_paid(dec("123.45")).unwrap();
    editor.set_raw_quantity(line_id, dec("7")).unwrap();
    editor.edit_balance_remaining(dec("99.99")).unwrap();
    editor.set_previous_balance(dec("42")).unwrap();
    editor.edit_amount_paid(dec("0.01")).unwrap();

    balance::check_reconciled(editor.document()).unwrap();
}
