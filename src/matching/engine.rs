use rusqlite::Connection;
use uuid::Uuid;

use super::error::MatchError;
use super::lifecycle::{MatchLifecycle, OrganReleasePolicy};
use super::pairs::{generate_candidate_pairs, CandidatePair};
use super::ranking::rank;
use super::store::{SqliteMatchStore, SqliteProfileStore};
use super::traits::{MatchStore, ProfileStore};
use crate::authorization::Actor;
use crate::models::{Match, Organ, UserRole};

/// Outward surface of the matching core.
///
/// Holds the stores and the release policy; each call borrows a connection
/// from the caller so request handlers control connection lifetime.
pub struct MatchingEngine {
    profiles: Box<dyn ProfileStore>,
    matches: Box<dyn MatchStore>,
    policy: OrganReleasePolicy,
}

impl MatchingEngine {
    pub fn new(
        profiles: Box<dyn ProfileStore>,
        matches: Box<dyn MatchStore>,
        policy: OrganReleasePolicy,
    ) -> Self {
        Self {
            profiles,
            matches,
            policy,
        }
    }

    /// Engine over the SQLite stores.
    pub fn sqlite(policy: OrganReleasePolicy) -> Self {
        Self::new(Box::new(SqliteProfileStore), Box::new(SqliteMatchStore), policy)
    }

    pub fn policy(&self) -> OrganReleasePolicy {
        self.policy
    }

    fn lifecycle(&self) -> MatchLifecycle<'_> {
        MatchLifecycle::new(self.profiles.as_ref(), self.matches.as_ref(), self.policy)
    }

    /// Ranked candidate pairs visible to the actor.
    ///
    /// Hospitals see the whole pool. Donors and recipients see only pairs
    /// involving their own profile, and nothing if they have none.
    pub fn potential_matches(
        &self,
        conn: &Connection,
        actor: &Actor,
    ) -> Result<Vec<CandidatePair>, MatchError> {
        let pairs = match actor.role {
            UserRole::Hospital => {
                let donors = self.profiles.available_donors(conn)?;
                let recipients = self.profiles.waiting_recipients(conn)?;
                generate_candidate_pairs(&donors, &recipients)
            }
            UserRole::Donor => match self.profiles.donor_for_user(conn, &actor.user_id)? {
                Some(donor) => {
                    let recipients = self.profiles.waiting_recipients(conn)?;
                    generate_candidate_pairs(std::slice::from_ref(&donor), &recipients)
                }
                None => Vec::new(),
            },
            UserRole::Recipient => match self.profiles.recipient_for_user(conn, &actor.user_id)? {
                Some(recipient) => {
                    let donors = self.profiles.available_donors(conn)?;
                    generate_candidate_pairs(&donors, std::slice::from_ref(&recipient))
                }
                None => Vec::new(),
            },
        };

        tracing::debug!(user = %actor.user_id, role = %actor.role, count = pairs.len(), "Potential matches computed");
        Ok(rank(&pairs))
    }

    pub fn create_match(
        &self,
        conn: &Connection,
        donor_id: &Uuid,
        recipient_id: &Uuid,
        organ: Organ,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        self.lifecycle()
            .create_match(conn, donor_id, recipient_id, organ, actor)
    }

    pub fn advance_match(
        &self,
        conn: &Connection,
        match_id: &Uuid,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        self.lifecycle().advance_match(conn, match_id, actor)
    }

    pub fn accept_match(
        &self,
        conn: &Connection,
        match_id: &Uuid,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        self.lifecycle().accept(conn, match_id, actor)
    }

    pub fn complete_match(
        &self,
        conn: &Connection,
        match_id: &Uuid,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        self.lifecycle().complete(conn, match_id, actor)
    }

    pub fn list_matches(&self, conn: &Connection, actor: &Actor) -> Result<Vec<Match>, MatchError> {
        self.lifecycle().list_matches(conn, actor)
    }
}
