//! Receipt issuing and tracking. Numbers are progressive per practice:
//! `PREFIX-YYYY-N` with the counter held in the settings row, claimed and
//! incremented inside the same transaction that stores the receipt.

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::enums::{PaymentMethod, ReceiptStatus};
use crate::models::filters::ReceiptFilter;
use crate::models::Receipt;

/// Fields gathered by the new-receipt form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptInput {
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub fiscal_code: String,
    pub issue_date: NaiveDate,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Issue a new receipt: claim the next progressive number and store the
/// receipt atomically, so two issues can never share a number.
pub fn issue_receipt(conn: &mut Connection, input: ReceiptInput) -> Result<Receipt, DatabaseError> {
    let tx = conn.transaction()?;

    let settings = db::get_practice_settings(&tx)?;
    let progressive = db::allocate_receipt_number(&tx)?;
    let number = format!(
        "{}-{}-{}",
        settings.receipt_prefix,
        input.issue_date.year(),
        progressive
    );

    let receipt = Receipt {
        id: Uuid::new_v4(),
        number,
        patient_id: input.patient_id,
        patient_name: input.patient_name,
        fiscal_code: input.fiscal_code,
        issue_date: input.issue_date,
        amount_cents: input.amount_cents,
        payment_method: input.payment_method,
        status: ReceiptStatus::Issued,
        notes: input.notes,
    };
    db::insert_receipt(&tx, &receipt)?;
    tx.commit()?;

    tracing::info!(number = %receipt.number, "issued receipt");
    Ok(receipt)
}

pub fn get_receipt(conn: &Connection, id: &Uuid) -> Result<Option<Receipt>, DatabaseError> {
    db::get_receipt(conn, id)
}

pub fn delete_receipt(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    db::delete_receipt(conn, id)?;
    tracing::info!(%id, "deleted receipt");
    Ok(())
}

pub fn list_receipts(
    conn: &Connection,
    filter: &ReceiptFilter,
) -> Result<Vec<Receipt>, DatabaseError> {
    db::list_receipts(conn, filter)
}

/// Mark a single receipt as sent to the tax system.
pub fn mark_sent(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    db::set_receipt_status(conn, id, ReceiptStatus::Sent)
}

/// Mark every issued receipt as sent ("Invia Tutte"); returns the count.
pub fn send_all_issued(conn: &Connection) -> Result<usize, DatabaseError> {
    let sent = db::mark_all_issued_sent(conn)?;
    tracing::info!(sent, "marked issued receipts as sent");
    Ok(sent)
}
