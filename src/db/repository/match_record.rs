use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

struct MatchRow {
    id: String,
    donor_id: String,
    recipient_id: String,
    organ: String,
    compatibility_score: u8,
    status: String,
    created_by: String,
    created_at: String,
    updated_at: String,
}

const MATCH_COLUMNS: &str = "id, donor_id, recipient_id, organ, compatibility_score, status,
     created_by, created_at, updated_at";

fn read_match_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        donor_id: row.get(1)?,
        recipient_id: row.get(2)?,
        organ: row.get(3)?,
        compatibility_score: row.get(4)?,
        status: row.get(5)?,
        created_by: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn match_from_row(row: MatchRow) -> Result<Match, DatabaseError> {
    Ok(Match {
        id: parse_uuid(&row.id)?,
        donor_id: parse_uuid(&row.donor_id)?,
        recipient_id: parse_uuid(&row.recipient_id)?,
        organ: Organ::from_str(&row.organ)?,
        compatibility_score: row.compatibility_score,
        status: MatchStatus::from_str(&row.status)?,
        created_by: parse_uuid(&row.created_by)?,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
    })
}

fn query_matches(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Match>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_match_row)?;

    let mut matches = Vec::new();
    for row in rows {
        matches.push(match_from_row(row?)?);
    }
    Ok(matches)
}

pub fn insert_match(conn: &Connection, record: &Match) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO matches (id, donor_id, recipient_id, organ, compatibility_score, status,
         created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.id.to_string(),
            record.donor_id.to_string(),
            record.recipient_id.to_string(),
            record.organ.as_str(),
            record.compatibility_score,
            record.status.as_str(),
            record.created_by.to_string(),
            format_timestamp(&record.created_at),
            format_timestamp(&record.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_match(conn: &Connection, id: &Uuid) -> Result<Option<Match>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?1"),
            params![id.to_string()],
            read_match_row,
        )
        .optional()?;
    row.map(match_from_row).transpose()
}

/// Compare-and-set on match status, stamping `updated_at`.
pub fn set_match_status_if(
    conn: &Connection,
    id: &Uuid,
    expected: MatchStatus,
    new_status: MatchStatus,
    at: &DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE matches SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        params![
            new_status.as_str(),
            format_timestamp(at),
            id.to_string(),
            expected.as_str(),
        ],
    )?;
    Ok(updated == 1)
}

pub fn list_matches_for_donor(conn: &Connection, donor_id: &Uuid) -> Result<Vec<Match>, DatabaseError> {
    query_matches(
        conn,
        &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE donor_id = ?1 ORDER BY created_at DESC"),
        params![donor_id.to_string()],
    )
}

pub fn list_matches_for_recipient(
    conn: &Connection,
    recipient_id: &Uuid,
) -> Result<Vec<Match>, DatabaseError> {
    query_matches(
        conn,
        &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE recipient_id = ?1 ORDER BY created_at DESC"),
        params![recipient_id.to_string()],
    )
}

pub fn list_all_matches(conn: &Connection) -> Result<Vec<Match>, DatabaseError> {
    query_matches(
        conn,
        &format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY created_at DESC"),
        [],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures::*;
    use crate::db::sqlite::open_memory_database;

    fn pending_match(donor: &DonorProfile, recipient: &RecipientProfile, organ: Organ, by: Uuid) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            donor_id: donor.id,
            recipient_id: recipient.id,
            organ,
            compatibility_score: 100,
            status: MatchStatus::Pending,
            created_by: by,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn match_insert_and_filtered_lists() {
        let conn = open_memory_database().unwrap();
        let (hospital, _) = make_hospital(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);
        let other = make_recipient(&conn, BloodType::APos, &[Organ::Heart], UrgencyLevel::Low);

        let record = pending_match(&donor, &recipient, Organ::Kidney, hospital.id);
        insert_match(&conn, &record).unwrap();

        assert_eq!(get_match(&conn, &record.id).unwrap().unwrap(), record);
        assert_eq!(list_matches_for_donor(&conn, &donor.id).unwrap().len(), 1);
        assert_eq!(list_matches_for_recipient(&conn, &recipient.id).unwrap().len(), 1);
        assert!(list_matches_for_recipient(&conn, &other.id).unwrap().is_empty());
        assert_eq!(list_all_matches(&conn).unwrap().len(), 1);
    }

    #[test]
    fn second_active_match_for_same_donor_organ_is_rejected() {
        let conn = open_memory_database().unwrap();
        let (hospital, _) = make_hospital(&conn);
        let donor = make_donor(&conn, BloodType::ONeg, &[Organ::Kidney]);
        let r1 = make_recipient(&conn, BloodType::APos, &[Organ::Kidney], UrgencyLevel::High);
        let r2 = make_recipient(&conn, BloodType::BPos, &[Organ::Kidney], UrgencyLevel::High);

        insert_match(&conn, &pending_match(&donor, &r1, Organ::Kidney, hospital.id)).unwrap();
        let err = insert_match(&conn, &pending_match(&donor, &r2, Organ::Kidney, hospital.id)).unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn status_compare_and_set() {
        let conn = open_memory_database().unwrap();
        let (hospital, _) = make_hospital(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Liver]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Liver], UrgencyLevel::Medium);
        let record = pending_match(&donor, &recipient, Organ::Liver, hospital.id);
        insert_match(&conn, &record).unwrap();

        let now = Utc::now();
        assert!(!set_match_status_if(&conn, &record.id, MatchStatus::Accepted, MatchStatus::Completed, &now).unwrap());
        assert!(set_match_status_if(&conn, &record.id, MatchStatus::Pending, MatchStatus::Accepted, &now).unwrap());

        let loaded = get_match(&conn, &record.id).unwrap().unwrap();
        assert_eq!(loaded.status, MatchStatus::Accepted);
        assert_eq!(loaded.updated_at, now);
    }
}
