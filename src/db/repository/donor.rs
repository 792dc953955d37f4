use std::collections::BTreeSet;
use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, organs_from_json, organs_to_json, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

struct DonorRow {
    id: String,
    user_id: String,
    blood_type: String,
    age: u8,
    organs_available: String,
    medical_history: Option<String>,
    status: String,
    created_at: String,
}

const DONOR_COLUMNS: &str =
    "id, user_id, blood_type, age, organs_available, medical_history, status, created_at";

fn read_donor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DonorRow> {
    Ok(DonorRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        blood_type: row.get(2)?,
        age: row.get(3)?,
        organs_available: row.get(4)?,
        medical_history: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn donor_from_row(row: DonorRow) -> Result<DonorProfile, DatabaseError> {
    Ok(DonorProfile {
        id: parse_uuid(&row.id)?,
        user_id: parse_uuid(&row.user_id)?,
        blood_type: BloodType::from_str(&row.blood_type)?,
        age: row.age,
        organs_available: organs_from_json(&row.organs_available)?,
        medical_history: row.medical_history,
        status: DonorStatus::from_str(&row.status)?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn query_donors(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<DonorProfile>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_donor_row)?;

    let mut donors = Vec::new();
    for row in rows {
        donors.push(donor_from_row(row?)?);
    }
    Ok(donors)
}

pub fn insert_donor(conn: &Connection, donor: &DonorProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO donor_profiles (id, user_id, blood_type, age, organs_available,
         medical_history, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            donor.id.to_string(),
            donor.user_id.to_string(),
            donor.blood_type.as_str(),
            donor.age,
            organs_to_json(&donor.organs_available),
            donor.medical_history,
            donor.status.as_str(),
            format_timestamp(&donor.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_donor(conn: &Connection, id: &Uuid) -> Result<Option<DonorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {DONOR_COLUMNS} FROM donor_profiles WHERE id = ?1"),
            params![id.to_string()],
            read_donor_row,
        )
        .optional()?;
    row.map(donor_from_row).transpose()
}

pub fn get_donor_by_user(conn: &Connection, user_id: &Uuid) -> Result<Option<DonorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {DONOR_COLUMNS} FROM donor_profiles WHERE user_id = ?1"),
            params![user_id.to_string()],
            read_donor_row,
        )
        .optional()?;
    row.map(donor_from_row).transpose()
}

/// All donors, oldest profile first.
pub fn list_donors(conn: &Connection) -> Result<Vec<DonorProfile>, DatabaseError> {
    query_donors(
        conn,
        &format!("SELECT {DONOR_COLUMNS} FROM donor_profiles ORDER BY created_at ASC, id ASC"),
        [],
    )
}

pub fn list_donors_by_status(
    conn: &Connection,
    status: DonorStatus,
) -> Result<Vec<DonorProfile>, DatabaseError> {
    query_donors(
        conn,
        &format!(
            "SELECT {DONOR_COLUMNS} FROM donor_profiles WHERE status = ?1
             ORDER BY created_at ASC, id ASC"
        ),
        params![status.as_str()],
    )
}

/// Overwrite the editable fields of the donor profile owned by `user_id`.
/// Status is left alone: it only moves through the match lifecycle.
pub fn update_donor_by_user(
    conn: &Connection,
    user_id: &Uuid,
    input: &DonorProfileInput,
) -> Result<Option<DonorProfile>, DatabaseError> {
    let updated = conn.execute(
        "UPDATE donor_profiles SET blood_type = ?1, age = ?2, organs_available = ?3,
         medical_history = ?4 WHERE user_id = ?5",
        params![
            input.blood_type.as_str(),
            input.age,
            organs_to_json(&input.organs_available),
            input.medical_history,
            user_id.to_string(),
        ],
    )?;
    if updated == 0 {
        return Ok(None);
    }
    get_donor_by_user(conn, user_id)
}

/// Compare-and-set on donor status. Returns false when the donor is missing
/// or not currently in `expected`.
pub fn set_donor_status_if(
    conn: &Connection,
    id: &Uuid,
    expected: DonorStatus,
    new_status: DonorStatus,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE donor_profiles SET status = ?1 WHERE id = ?2 AND status = ?3",
        params![new_status.as_str(), id.to_string(), expected.as_str()],
    )?;
    Ok(updated == 1)
}

pub fn set_donor_organs(
    conn: &Connection,
    id: &Uuid,
    organs: &BTreeSet<Organ>,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE donor_profiles SET organs_available = ?1 WHERE id = ?2",
        params![organs_to_json(organs), id.to_string()],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "donor_profile".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
