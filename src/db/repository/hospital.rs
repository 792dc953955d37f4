use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_hospital(conn: &Connection, hospital: &HospitalProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO hospital_profiles (id, user_id, hospital_name, location, contact_number, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            hospital.id.to_string(),
            hospital.user_id.to_string(),
            hospital.hospital_name,
            hospital.location,
            hospital.contact_number,
            format_timestamp(&hospital.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_hospital_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<HospitalProfile>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, user_id, hospital_name, location, contact_number, created_at
             FROM hospital_profiles WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, user_id, hospital_name, location, contact_number, created_at)) => {
            Ok(Some(HospitalProfile {
                id: parse_uuid(&id)?,
                user_id: parse_uuid(&user_id)?,
                hospital_name,
                location,
                contact_number,
                created_at: parse_timestamp(&created_at)?,
            }))
        }
        None => Ok(None),
    }
}
