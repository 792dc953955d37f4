//! SQLite implementations of the matching store contracts.

use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use super::error::MatchError;
use super::traits::{MatchStore, ProfileStore};
use crate::db::repository;
use crate::models::{
    DonorProfile, DonorStatus, Match, MatchStatus, Organ, RecipientProfile, RecipientStatus,
};

/// Profile store backed by the `donor_profiles` and `recipient_profiles` tables.
pub struct SqliteProfileStore;

impl ProfileStore for SqliteProfileStore {
    fn available_donors(&self, conn: &Connection) -> Result<Vec<DonorProfile>, MatchError> {
        Ok(repository::list_donors_by_status(conn, DonorStatus::Available)?)
    }

    fn waiting_recipients(&self, conn: &Connection) -> Result<Vec<RecipientProfile>, MatchError> {
        Ok(repository::list_recipients_by_status(conn, RecipientStatus::Waiting)?)
    }

    fn get_donor(&self, conn: &Connection, id: &Uuid) -> Result<Option<DonorProfile>, MatchError> {
        Ok(repository::get_donor(conn, id)?)
    }

    fn get_recipient(
        &self,
        conn: &Connection,
        id: &Uuid,
    ) -> Result<Option<RecipientProfile>, MatchError> {
        Ok(repository::get_recipient(conn, id)?)
    }

    fn donor_for_user(
        &self,
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<DonorProfile>, MatchError> {
        Ok(repository::get_donor_by_user(conn, user_id)?)
    }

    fn recipient_for_user(
        &self,
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<RecipientProfile>, MatchError> {
        Ok(repository::get_recipient_by_user(conn, user_id)?)
    }

    fn set_donor_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: DonorStatus,
        new_status: DonorStatus,
    ) -> Result<bool, MatchError> {
        Ok(repository::set_donor_status_if(conn, id, expected, new_status)?)
    }

    fn set_recipient_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: RecipientStatus,
        new_status: RecipientStatus,
    ) -> Result<bool, MatchError> {
        Ok(repository::set_recipient_status_if(conn, id, expected, new_status)?)
    }

    fn release_donor_organ(
        &self,
        conn: &Connection,
        id: &Uuid,
        organ: Organ,
    ) -> Result<DonorProfile, MatchError> {
        let mut donor = repository::get_donor(conn, id)?
            .ok_or_else(|| MatchError::not_found("Donor", id))?;

        donor.organs_available.remove(&organ);
        repository::set_donor_organs(conn, id, &donor.organs_available)?;

        let next = if donor.organs_available.is_empty() {
            DonorStatus::Unavailable
        } else {
            DonorStatus::Available
        };
        if next != donor.status {
            if !repository::set_donor_status_if(conn, id, donor.status, next)? {
                return Err(MatchError::Conflict(format!("donor {id} changed during release")));
            }
            donor.status = next;
        }
        Ok(donor)
    }

    fn release_recipient_organ(
        &self,
        conn: &Connection,
        id: &Uuid,
        organ: Organ,
    ) -> Result<RecipientProfile, MatchError> {
        let mut recipient = repository::get_recipient(conn, id)?
            .ok_or_else(|| MatchError::not_found("Recipient", id))?;

        recipient.organs_needed.remove(&organ);
        repository::set_recipient_organs(conn, id, &recipient.organs_needed)?;

        // A recipient with nothing left to receive stays matched.
        if !recipient.organs_needed.is_empty() && recipient.status != RecipientStatus::Waiting {
            if !repository::set_recipient_status_if(
                conn,
                id,
                recipient.status,
                RecipientStatus::Waiting,
            )? {
                return Err(MatchError::Conflict(format!("recipient {id} changed during release")));
            }
            recipient.status = RecipientStatus::Waiting;
        }
        Ok(recipient)
    }
}

/// Match store backed by the `matches` table.
pub struct SqliteMatchStore;

impl MatchStore for SqliteMatchStore {
    fn insert(&self, conn: &Connection, record: &Match) -> Result<(), MatchError> {
        repository::insert_match(conn, record).map_err(|e| {
            if e.is_unique_violation() && record.status.is_active() {
                MatchError::Conflict(format!(
                    "an active {} match already holds this donor or recipient",
                    record.organ
                ))
            } else {
                e.into()
            }
        })
    }

    fn get(&self, conn: &Connection, id: &Uuid) -> Result<Option<Match>, MatchError> {
        Ok(repository::get_match(conn, id)?)
    }

    fn set_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: MatchStatus,
        new_status: MatchStatus,
    ) -> Result<bool, MatchError> {
        Ok(repository::set_match_status_if(conn, id, expected, new_status, &Utc::now())?)
    }

    fn list_for_donor(&self, conn: &Connection, donor_id: &Uuid) -> Result<Vec<Match>, MatchError> {
        Ok(repository::list_matches_for_donor(conn, donor_id)?)
    }

    fn list_for_recipient(
        &self,
        conn: &Connection,
        recipient_id: &Uuid,
    ) -> Result<Vec<Match>, MatchError> {
        Ok(repository::list_matches_for_recipient(conn, recipient_id)?)
    }

    fn list_all(&self, conn: &Connection) -> Result<Vec<Match>, MatchError> {
        Ok(repository::list_all_matches(conn)?)
    }
}
