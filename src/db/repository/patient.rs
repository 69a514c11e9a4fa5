use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::Sex;
use crate::models::filters::PatientFilter;
use crate::models::Patient;

const PATIENT_COLUMNS: &str = "id, first_name, last_name, fiscal_code, birth_place, birth_date,
         sex, phone, email, address, created_at, updated_at";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, first_name, last_name, fiscal_code, birth_place, birth_date,
         sex, phone, email, address, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            patient.id.to_string(),
            patient.first_name,
            patient.last_name,
            patient.fiscal_code,
            patient.birth_place,
            patient.birth_date.map(|d| d.to_string()),
            patient.sex.map(|s| s.as_str()),
            patient.phone,
            patient.email,
            patient.address,
            patient.created_at.format(TIMESTAMP_FORMAT).to_string(),
            patient.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], map_patient_row);

    match result {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET first_name = ?2, last_name = ?3, fiscal_code = ?4,
         birth_place = ?5, birth_date = ?6, sex = ?7, phone = ?8, email = ?9,
         address = ?10, updated_at = ?11
         WHERE id = ?1",
        params![
            patient.id.to_string(),
            patient.first_name,
            patient.last_name,
            patient.fiscal_code,
            patient.birth_place,
            patient.birth_date.map(|d| d.to_string()),
            patient.sex.map(|s| s.as_str()),
            patient.phone,
            patient.email,
            patient.address,
            patient.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: patient.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_patient(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id.to_string()])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn list_patients(
    conn: &Connection,
    filter: &PatientFilter,
) -> Result<Vec<Patient>, DatabaseError> {
    match filter.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PATIENT_COLUMNS} FROM patients
                 WHERE LOWER(first_name) LIKE ?1
                    OR LOWER(last_name) LIKE ?1
                    OR LOWER(fiscal_code) LIKE ?1
                 ORDER BY last_name, first_name"
            ))?;
            let pattern = format!("%{}%", query.to_lowercase());
            let rows = stmt.query_map(params![pattern], map_patient_row)?;
            rows.map(|r| r.map_err(DatabaseError::from)).collect()
        }
        _ => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name"
            ))?;
            let rows = stmt.query_map([], map_patient_row)?;
            rows.map(|r| r.map_err(DatabaseError::from)).collect()
        }
    }
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

fn map_patient_row(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        fiscal_code: row.get(3)?,
        birth_place: row.get(4)?,
        birth_date: row
            .get::<_, Option<String>>(5)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        sex: row
            .get::<_, Option<String>>(6)?
            .and_then(|s| Sex::from_str(&s).ok()),
        phone: row.get(7)?,
        email: row.get(8)?,
        address: row.get(9)?,
        created_at: parse_timestamp(&row.get::<_, String>(10)?),
        updated_at: parse_timestamp(&row.get::<_, String>(11)?),
    })
}

fn parse_timestamp(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .unwrap_or_default()
}
