use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::Session;

pub fn insert_session(conn: &Connection, session: &Session) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            session.token_hash,
            session.user_id.to_string(),
            format_timestamp(&session.created_at),
            format_timestamp(&session.expires_at),
        ],
    )?;
    Ok(())
}

/// Resolve a token hash to its user, ignoring sessions expired at `now`.
pub fn get_session_user(
    conn: &Connection,
    token_hash: &str,
    now: &DateTime<Utc>,
) -> Result<Option<Uuid>, DatabaseError> {
    let user_id = conn
        .query_row(
            "SELECT user_id FROM sessions WHERE token_hash = ?1 AND expires_at > ?2",
            params![token_hash, format_timestamp(now)],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    user_id.as_deref().map(parse_uuid).transpose()
}

pub fn delete_session(conn: &Connection, token_hash: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM sessions WHERE token_hash = ?1", params![token_hash])?;
    Ok(())
}

/// Drop every session that expired before `now`. Returns the number removed.
pub fn prune_expired_sessions(conn: &Connection, now: &DateTime<Utc>) -> Result<usize, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![format_timestamp(now)],
    )?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::db::repository::fixtures::make_user;
    use crate::db::sqlite::open_memory_database;
    use crate::models::UserRole;

    #[test]
    fn expired_sessions_do_not_resolve() {
        let conn = open_memory_database().unwrap();
        let user = make_user(&conn, UserRole::Hospital);
        let now = Utc::now();

        insert_session(&conn, &Session {
            token_hash: "live".into(),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::days(7),
        }).unwrap();
        insert_session(&conn, &Session {
            token_hash: "stale".into(),
            user_id: user.id,
            created_at: now - Duration::days(8),
            expires_at: now - Duration::days(1),
        }).unwrap();

        assert_eq!(get_session_user(&conn, "live", &now).unwrap(), Some(user.id));
        assert_eq!(get_session_user(&conn, "stale", &now).unwrap(), None);
        assert_eq!(get_session_user(&conn, "missing", &now).unwrap(), None);

        assert_eq!(prune_expired_sessions(&conn, &now).unwrap(), 1);
        delete_session(&conn, "live").unwrap();
        assert_eq!(get_session_user(&conn, "live", &now).unwrap(), None);
    }
}
