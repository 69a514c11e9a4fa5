//! Patient registry — input types and operations over the patients table,
//! plus the fiscal-code assignment the record form triggers.

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::fiscal_code::{self, FiscalCodeError};
use crate::models::enums::Sex;
use crate::models::filters::PatientFilter;
use crate::models::Patient;

/// Editable patient fields, as gathered by a record form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    pub fiscal_code: String,
    pub birth_place: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

pub fn create_patient(conn: &Connection, input: PatientInput) -> Result<Patient, DatabaseError> {
    let now = Local::now().naive_local();
    let patient = Patient {
        id: Uuid::new_v4(),
        first_name: input.first_name,
        last_name: input.last_name,
        fiscal_code: input.fiscal_code,
        birth_place: input.birth_place,
        birth_date: input.birth_date,
        sex: input.sex,
        phone: input.phone,
        email: input.email,
        address: input.address,
        created_at: now,
        updated_at: now,
    };
    db::insert_patient(conn, &patient)?;
    tracing::info!(id = %patient.id, "created patient");
    Ok(patient)
}

pub fn update_patient(
    conn: &Connection,
    id: &Uuid,
    input: PatientInput,
) -> Result<Patient, DatabaseError> {
    let existing = db::get_patient(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patient".into(),
        id: id.to_string(),
    })?;

    let patient = Patient {
        id: *id,
        first_name: input.first_name,
        last_name: input.last_name,
        fiscal_code: input.fiscal_code,
        birth_place: input.birth_place,
        birth_date: input.birth_date,
        sex: input.sex,
        phone: input.phone,
        email: input.email,
        address: input.address,
        created_at: existing.created_at,
        updated_at: Local::now().naive_local(),
    };
    db::update_patient(conn, &patient)?;
    tracing::debug!(id = %patient.id, "updated patient");
    Ok(patient)
}

pub fn delete_patient(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    db::delete_patient(conn, id)?;
    tracing::info!(%id, "deleted patient");
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    db::get_patient(conn, id)
}

/// List patients, optionally narrowed by a search query (case-insensitive
/// substring over first name, last name and fiscal code).
pub fn list_patients(
    conn: &Connection,
    filter: &PatientFilter,
) -> Result<Vec<Patient>, DatabaseError> {
    db::list_patients(conn, filter)
}

/// Derive the fiscal code from the draft's personal data and write it into
/// the draft's `fiscal_code` field. The form calls this on demand; after
/// that the field is ordinary patient data and may be edited by hand.
///
/// Requires last name, first name, birth date and birth place. Sex defaults
/// to male when unset, as the original form did.
pub fn assign_fiscal_code(input: &mut PatientInput) -> Result<(), FiscalCodeError> {
    let birth_date = input
        .birth_date
        .ok_or(FiscalCodeError::MissingField("birth date"))?;
    let birth_place = input
        .birth_place
        .as_deref()
        .ok_or(FiscalCodeError::MissingField("birth place"))?;

    let sex = input.sex.unwrap_or(Sex::Male);
    let date_text = birth_date.format("%d/%m/%Y").to_string();

    input.fiscal_code = fiscal_code::try_compute_fiscal_code(
        &input.first_name,
        &input.last_name,
        &date_text,
        birth_place,
        sex.as_str(),
    )?;
    Ok(())
}
