use std::collections::BTreeSet;
use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, organs_from_json, organs_to_json, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

struct RecipientRow {
    id: String,
    user_id: String,
    blood_type: String,
    age: u8,
    organs_needed: String,
    urgency_level: String,
    medical_history: Option<String>,
    status: String,
    created_at: String,
}

const RECIPIENT_COLUMNS: &str = "id, user_id, blood_type, age, organs_needed, urgency_level,
     medical_history, status, created_at";

fn read_recipient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecipientRow> {
    Ok(RecipientRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        blood_type: row.get(2)?,
        age: row.get(3)?,
        organs_needed: row.get(4)?,
        urgency_level: row.get(5)?,
        medical_history: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn recipient_from_row(row: RecipientRow) -> Result<RecipientProfile, DatabaseError> {
    Ok(RecipientProfile {
        id: parse_uuid(&row.id)?,
        user_id: parse_uuid(&row.user_id)?,
        blood_type: BloodType::from_str(&row.blood_type)?,
        age: row.age,
        organs_needed: organs_from_json(&row.organs_needed)?,
        urgency_level: UrgencyLevel::from_str(&row.urgency_level)?,
        medical_history: row.medical_history,
        status: RecipientStatus::from_str(&row.status)?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn query_recipients(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<RecipientProfile>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_recipient_row)?;

    let mut recipients = Vec::new();
    for row in rows {
        recipients.push(recipient_from_row(row?)?);
    }
    Ok(recipients)
}

pub fn insert_recipient(conn: &Connection, recipient: &RecipientProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO recipient_profiles (id, user_id, blood_type, age, organs_needed,
         urgency_level, medical_history, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            recipient.id.to_string(),
            recipient.user_id.to_string(),
            recipient.blood_type.as_str(),
            recipient.age,
            organs_to_json(&recipient.organs_needed),
            recipient.urgency_level.as_str(),
            recipient.medical_history,
            recipient.status.as_str(),
            format_timestamp(&recipient.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_recipient(conn: &Connection, id: &Uuid) -> Result<Option<RecipientProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {RECIPIENT_COLUMNS} FROM recipient_profiles WHERE id = ?1"),
            params![id.to_string()],
            read_recipient_row,
        )
        .optional()?;
    row.map(recipient_from_row).transpose()
}

pub fn get_recipient_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<RecipientProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {RECIPIENT_COLUMNS} FROM recipient_profiles WHERE user_id = ?1"),
            params![user_id.to_string()],
            read_recipient_row,
        )
        .optional()?;
    row.map(recipient_from_row).transpose()
}

/// All recipients, oldest profile first.
pub fn list_recipients(conn: &Connection) -> Result<Vec<RecipientProfile>, DatabaseError> {
    query_recipients(
        conn,
        &format!("SELECT {RECIPIENT_COLUMNS} FROM recipient_profiles ORDER BY created_at ASC, id ASC"),
        [],
    )
}

pub fn list_recipients_by_status(
    conn: &Connection,
    status: RecipientStatus,
) -> Result<Vec<RecipientProfile>, DatabaseError> {
    query_recipients(
        conn,
        &format!(
            "SELECT {RECIPIENT_COLUMNS} FROM recipient_profiles WHERE status = ?1
             ORDER BY created_at ASC, id ASC"
        ),
        params![status.as_str()],
    )
}

/// Overwrite the editable fields of the recipient profile owned by `user_id`.
pub fn update_recipient_by_user(
    conn: &Connection,
    user_id: &Uuid,
    input: &RecipientProfileInput,
) -> Result<Option<RecipientProfile>, DatabaseError> {
    let updated = conn.execute(
        "UPDATE recipient_profiles SET blood_type = ?1, age = ?2, organs_needed = ?3,
         urgency_level = ?4, medical_history = ?5 WHERE user_id = ?6",
        params![
            input.blood_type.as_str(),
            input.age,
            organs_to_json(&input.organs_needed),
            input.urgency_level.as_str(),
            input.medical_history,
            user_id.to_string(),
        ],
    )?;
    if updated == 0 {
        return Ok(None);
    }
    get_recipient_by_user(conn, user_id)
}

/// Compare-and-set on recipient status.
pub fn set_recipient_status_if(
    conn: &Connection,
    id: &Uuid,
    expected: RecipientStatus,
    new_status: RecipientStatus,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE recipient_profiles SET status = ?1 WHERE id = ?2 AND status = ?3",
        params![new_status.as_str(), id.to_string(), expected.as_str()],
    )?;
    Ok(updated == 1)
}

pub fn set_recipient_organs(
    conn: &Connection,
    id: &Uuid,
    organs: &BTreeSet<Organ>,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE recipient_profiles SET organs_needed = ?1 WHERE id = ?2",
        params![organs_to_json(organs), id.to_string()],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "recipient_profile".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures::make_recipient;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn recipient_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let recipient = make_recipient(&conn, BloodType::AbPos, &[Organ::Kidney, Organ::Liver], UrgencyLevel::High);

        let loaded = get_recipient(&conn, &recipient.id).unwrap().unwrap();
        assert_eq!(loaded, recipient);
        assert_eq!(loaded.urgency_level, UrgencyLevel::High);
        assert_eq!(
            get_recipient_by_user(&conn, &recipient.user_id).unwrap().unwrap().id,
            recipient.id
        );
    }

    #[test]
    fn waiting_filter_excludes_matched() {
        let conn = open_memory_database().unwrap();
        let waiting = make_recipient(&conn, BloodType::ONeg, &[Organ::Heart], UrgencyLevel::Critical);
        let matched = make_recipient(&conn, BloodType::ONeg, &[Organ::Heart], UrgencyLevel::Low);
        assert!(set_recipient_status_if(&conn, &matched.id, RecipientStatus::Waiting, RecipientStatus::Matched).unwrap());

        let listed = list_recipients_by_status(&conn, RecipientStatus::Waiting).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, waiting.id);
        assert_eq!(list_recipients(&conn).unwrap().len(), 2);
    }

    #[test]
    fn update_changes_urgency() {
        let conn = open_memory_database().unwrap();
        let recipient = make_recipient(&conn, BloodType::BPos, &[Organ::Lungs], UrgencyLevel::Medium);

        let input = RecipientProfileInput {
            blood_type: BloodType::BPos,
            age: 53,
            organs_needed: [Organ::Lungs].into_iter().collect(),
            urgency_level: UrgencyLevel::Critical,
            medical_history: None,
        };
        let updated = update_recipient_by_user(&conn, &recipient.user_id, &input).unwrap().unwrap();
        assert_eq!(updated.urgency_level, UrgencyLevel::Critical);
        assert_eq!(updated.status, RecipientStatus::Waiting);
    }
}
