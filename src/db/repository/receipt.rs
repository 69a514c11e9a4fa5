use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::{PaymentMethod, ReceiptStatus};
use crate::models::filters::ReceiptFilter;
use crate::models::Receipt;

const RECEIPT_COLUMNS: &str = "id, number, patient_id, patient_name, fiscal_code, issue_date,
         amount_cents, payment_method, status, notes";

pub fn insert_receipt(conn: &Connection, receipt: &Receipt) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO receipts (id, number, patient_id, patient_name, fiscal_code, issue_date,
         amount_cents, payment_method, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            receipt.id.to_string(),
            receipt.number,
            receipt.patient_id.map(|id| id.to_string()),
            receipt.patient_name,
            receipt.fiscal_code,
            receipt.issue_date.to_string(),
            receipt.amount_cents,
            receipt.payment_method.as_str(),
            receipt.status.as_str(),
            receipt.notes,
        ],
    )?;
    Ok(())
}

pub fn get_receipt(conn: &Connection, id: &Uuid) -> Result<Option<Receipt>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(ReceiptRow {
            id: row.get(0)?,
            number: row.get(1)?,
            patient_id: row.get(2)?,
            patient_name: row.get(3)?,
            fiscal_code: row.get(4)?,
            issue_date: row.get(5)?,
            amount_cents: row.get(6)?,
            payment_method: row.get(7)?,
            status: row.get(8)?,
            notes: row.get(9)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(receipt_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_receipt(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM receipts WHERE id = ?1", params![id.to_string()])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "receipt".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// List receipts matching the filter, newest first.
pub fn list_receipts(
    conn: &Connection,
    filter: &ReceiptFilter,
) -> Result<Vec<Receipt>, DatabaseError> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(year) = filter.year {
        values.push(year.to_string());
        clauses.push("strftime('%Y', issue_date) = ?");
    }
    if let Some(month) = filter.month {
        values.push(format!("{month:02}"));
        clauses.push("strftime('%m', issue_date) = ?");
    }
    if let Some(status) = filter.status {
        values.push(status.as_str().to_string());
        clauses.push("status = ?");
    }
    if let Some(query) = filter.query.as_deref().map(str::trim) {
        if !query.is_empty() {
            values.push(format!("%{}%", query.to_lowercase()));
            clauses.push(
                "(LOWER(number) LIKE ? OR LOWER(patient_name) LIKE ? OR LOWER(fiscal_code) LIKE ?)",
            );
            // Same pattern bound three times, positionally.
            let pattern = values[values.len() - 1].clone();
            values.push(pattern.clone());
            values.push(pattern);
        }
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT {RECEIPT_COLUMNS} FROM receipts {where_clause}
         ORDER BY issue_date DESC, number DESC"
    ))?;

    let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), |row| {
        Ok(ReceiptRow {
            id: row.get(0)?,
            number: row.get(1)?,
            patient_id: row.get(2)?,
            patient_name: row.get(3)?,
            fiscal_code: row.get(4)?,
            issue_date: row.get(5)?,
            amount_cents: row.get(6)?,
            payment_method: row.get(7)?,
            status: row.get(8)?,
            notes: row.get(9)?,
        })
    })?;

    let mut receipts = Vec::new();
    for row in rows {
        receipts.push(receipt_from_row(row?)?);
    }
    Ok(receipts)
}

pub fn set_receipt_status(
    conn: &Connection,
    id: &Uuid,
    status: ReceiptStatus,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE receipts SET status = ?2 WHERE id = ?1",
        params![id.to_string(), status.as_str()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "receipt".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Mark every issued receipt as sent; returns how many were updated.
pub fn mark_all_issued_sent(conn: &Connection) -> Result<usize, DatabaseError> {
    let changed = conn.execute(
        "UPDATE receipts SET status = ?1 WHERE status = ?2",
        params![ReceiptStatus::Sent.as_str(), ReceiptStatus::Issued.as_str()],
    )?;
    Ok(changed)
}

// Internal row type for Receipt mapping
struct ReceiptRow {
    id: String,
    number: String,
    patient_id: Option<String>,
    patient_name: String,
    fiscal_code: String,
    issue_date: String,
    amount_cents: i64,
    payment_method: String,
    status: String,
    notes: Option<String>,
}

fn receipt_from_row(row: ReceiptRow) -> Result<Receipt, DatabaseError> {
    Ok(Receipt {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        number: row.number,
        patient_id: row.patient_id.and_then(|s| Uuid::parse_str(&s).ok()),
        patient_name: row.patient_name,
        fiscal_code: row.fiscal_code,
        issue_date: NaiveDate::parse_from_str(&row.issue_date, "%Y-%m-%d").unwrap_or_default(),
        amount_cents: row.amount_cents,
        payment_method: PaymentMethod::from_str(&row.payment_method)?,
        status: ReceiptStatus::from_str(&row.status)?,
        notes: row.notes,
    })
}
