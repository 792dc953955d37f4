use rusqlite::Connection;
use uuid::Uuid;

use super::error::MatchError;
use crate::models::{
    DonorProfile, DonorStatus, Match, MatchStatus, Organ, RecipientProfile, RecipientStatus,
};

/// Donor and recipient storage consumed by the matching engine.
///
/// Every method takes the connection explicitly so the lifecycle manager can
/// run several calls inside one transaction.
pub trait ProfileStore: Send + Sync {
    fn available_donors(&self, conn: &Connection) -> Result<Vec<DonorProfile>, MatchError>;

    fn waiting_recipients(&self, conn: &Connection) -> Result<Vec<RecipientProfile>, MatchError>;

    fn get_donor(&self, conn: &Connection, id: &Uuid) -> Result<Option<DonorProfile>, MatchError>;

    fn get_recipient(
        &self,
        conn: &Connection,
        id: &Uuid,
    ) -> Result<Option<RecipientProfile>, MatchError>;

    fn donor_for_user(
        &self,
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<DonorProfile>, MatchError>;

    fn recipient_for_user(
        &self,
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<RecipientProfile>, MatchError>;

    /// Atomic compare-and-set. Returns false when the donor was not in `expected`.
    fn set_donor_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: DonorStatus,
        new_status: DonorStatus,
    ) -> Result<bool, MatchError>;

    /// Atomic compare-and-set. Returns false when the recipient was not in `expected`.
    fn set_recipient_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: RecipientStatus,
        new_status: RecipientStatus,
    ) -> Result<bool, MatchError>;

    /// Remove a transplanted organ from the donor's offer and set the
    /// resulting status. Returns the organs still on offer.
    fn release_donor_organ(
        &self,
        conn: &Connection,
        id: &Uuid,
        organ: Organ,
    ) -> Result<DonorProfile, MatchError>;

    /// Remove a received organ from the recipient's needs and set the
    /// resulting status.
    fn release_recipient_organ(
        &self,
        conn: &Connection,
        id: &Uuid,
        organ: Organ,
    ) -> Result<RecipientProfile, MatchError>;
}

/// Persisted match records.
pub trait MatchStore: Send + Sync {
    fn insert(&self, conn: &Connection, record: &Match) -> Result<(), MatchError>;

    fn get(&self, conn: &Connection, id: &Uuid) -> Result<Option<Match>, MatchError>;

    /// Atomic compare-and-set on status, keyed on the current status.
    fn set_status_if(
        &self,
        conn: &Connection,
        id: &Uuid,
        expected: MatchStatus,
        new_status: MatchStatus,
    ) -> Result<bool, MatchError>;

    fn list_for_donor(&self, conn: &Connection, donor_id: &Uuid) -> Result<Vec<Match>, MatchError>;

    fn list_for_recipient(
        &self,
        conn: &Connection,
        recipient_id: &Uuid,
    ) -> Result<Vec<Match>, MatchError>;

    fn list_all(&self, conn: &Connection) -> Result<Vec<Match>, MatchError>;
}
