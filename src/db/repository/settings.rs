use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::PracticeSettings;

/// Read the singleton settings row (seeded by migration 002).
pub fn get_practice_settings(conn: &Connection) -> Result<PracticeSettings, DatabaseError> {
    let settings = conn.query_row(
        "SELECT practitioner_name, profession, vat_number, fiscal_code, office_address,
         receipt_prefix, next_receipt_number
         FROM practice_settings WHERE id = 1",
        [],
        |row| {
            Ok(PracticeSettings {
                practitioner_name: row.get(0)?,
                profession: row.get(1)?,
                vat_number: row.get(2)?,
                fiscal_code: row.get(3)?,
                office_address: row.get(4)?,
                receipt_prefix: row.get(5)?,
                next_receipt_number: row.get(6)?,
            })
        },
    )?;
    Ok(settings)
}

pub fn update_practice_settings(
    conn: &Connection,
    settings: &PracticeSettings,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE practice_settings SET practitioner_name = ?1, profession = ?2, vat_number = ?3,
         fiscal_code = ?4, office_address = ?5, receipt_prefix = ?6, next_receipt_number = ?7
         WHERE id = 1",
        params![
            settings.practitioner_name,
            settings.profession,
            settings.vat_number,
            settings.fiscal_code,
            settings.office_address,
            settings.receipt_prefix,
            settings.next_receipt_number,
        ],
    )?;
    Ok(())
}

/// Claim the next progressive receipt number, incrementing the counter.
pub fn allocate_receipt_number(conn: &Connection) -> Result<i64, DatabaseError> {
    let number: i64 = conn.query_row(
        "SELECT next_receipt_number FROM practice_settings WHERE id = 1",
        [],
        |row| row.get(0),
    )?;
    conn.execute(
        "UPDATE practice_settings SET next_receipt_number = next_receipt_number + 1 WHERE id = 1",
        [],
    )?;
    Ok(number)
}
