//! Practice settings (Impostazioni): practitioner identity and the receipt
//! numbering configuration, stored as a singleton row.

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::models::PracticeSettings;

pub fn get_settings(conn: &Connection) -> Result<PracticeSettings, DatabaseError> {
    db::get_practice_settings(conn)
}

pub fn update_settings(
    conn: &Connection,
    settings: &PracticeSettings,
) -> Result<(), DatabaseError> {
    if settings.receipt_prefix.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "receipt prefix must not be empty".into(),
        ));
    }
    if settings.next_receipt_number < 1 {
        return Err(DatabaseError::ConstraintViolation(
            "next receipt number must be positive".into(),
        ));
    }
    db::update_practice_settings(conn, settings)?;
    tracing::debug!("updated practice settings");
    Ok(())
}
