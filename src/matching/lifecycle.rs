//! Match lifecycle: `pending → accepted → completed`.
//!
//! Creation and every transition run inside one `BEGIN IMMEDIATE`
//! transaction. Status flips are conditional updates keyed on the status read
//! at the start, so a concurrent writer turns into a `Conflict` instead of a
//! silent double assignment. Dropping the transaction on any error rolls back
//! everything.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::compatibility::compatibility_score;
use super::error::MatchError;
use super::traits::{MatchStore, ProfileStore};
use crate::authorization::{require_match_owner, require_role, Actor};
use crate::models::{
    DonorStatus, Match, MatchStatus, Organ, RecipientStatus, UserRole,
};

/// What completing a match does to the donor and recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganReleasePolicy {
    /// Donor and recipient stay `matched` for good.
    #[default]
    Consume,
    /// The transplanted organ leaves both organ sets; each side goes back
    /// into the pool if it still has organs to give or receive.
    ReleaseRemaining,
}

impl OrganReleasePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consume => "consume",
            Self::ReleaseRemaining => "release_remaining",
        }
    }
}

impl FromStr for OrganReleasePolicy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consume" => Ok(Self::Consume),
            "release_remaining" => Ok(Self::ReleaseRemaining),
            other => Err(MatchError::InvalidArgument(format!(
                "unknown release policy '{other}'"
            ))),
        }
    }
}

/// Requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Accept,
    Complete,
    Advance,
}

impl Step {
    /// Status the match must currently hold, `None` for "whatever is next".
    fn required_status(self) -> Option<MatchStatus> {
        match self {
            Self::Accept => Some(MatchStatus::Pending),
            Self::Complete => Some(MatchStatus::Accepted),
            Self::Advance => None,
        }
    }

    fn target_name(self) -> &'static str {
        match self {
            Self::Accept => "accepted",
            Self::Complete => "completed",
            Self::Advance => "a later status",
        }
    }
}

/// Lifecycle operations over borrowed stores.
pub struct MatchLifecycle<'a> {
    profiles: &'a dyn ProfileStore,
    matches: &'a dyn MatchStore,
    policy: OrganReleasePolicy,
}

impl<'a> MatchLifecycle<'a> {
    pub fn new(
        profiles: &'a dyn ProfileStore,
        matches: &'a dyn MatchStore,
        policy: OrganReleasePolicy,
    ) -> Self {
        Self {
            profiles,
            matches,
            policy,
        }
    }

    /// Confirm a donor/recipient/organ pairing as a pending match.
    pub fn create_match(
        &self,
        conn: &Connection,
        donor_id: &Uuid,
        recipient_id: &Uuid,
        organ: Organ,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        require_role(actor, &[UserRole::Hospital], "creating a match")?;

        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

        let donor = self
            .profiles
            .get_donor(&tx, donor_id)?
            .ok_or_else(|| MatchError::not_found("Donor", donor_id))?;
        let recipient = self
            .profiles
            .get_recipient(&tx, recipient_id)?
            .ok_or_else(|| MatchError::not_found("Recipient", recipient_id))?;

        if donor.status != DonorStatus::Available {
            warn!(donor_id = %donor_id, status = %donor.status, "Match rejected: donor not available");
            return Err(MatchError::Conflict(format!(
                "donor {donor_id} is {}, not available",
                donor.status
            )));
        }
        if recipient.status != RecipientStatus::Waiting {
            warn!(recipient_id = %recipient_id, status = %recipient.status, "Match rejected: recipient not waiting");
            return Err(MatchError::Conflict(format!(
                "recipient {recipient_id} is {}, not waiting",
                recipient.status
            )));
        }
        if !donor.organs_available.contains(&organ) {
            return Err(MatchError::InvalidArgument(format!(
                "donor {donor_id} does not offer {organ}"
            )));
        }
        if !recipient.organs_needed.contains(&organ) {
            return Err(MatchError::InvalidArgument(format!(
                "recipient {recipient_id} does not need {organ}"
            )));
        }
        let score = compatibility_score(donor.blood_type, recipient.blood_type).ok_or_else(|| {
            MatchError::InvalidArgument(format!(
                "blood type {} cannot donate to {}",
                donor.blood_type, recipient.blood_type
            ))
        })?;

        if !self.profiles.set_donor_status_if(
            &tx,
            donor_id,
            DonorStatus::Available,
            DonorStatus::Matched,
        )? {
            return Err(MatchError::Conflict(format!("donor {donor_id} was matched concurrently")));
        }
        if !self.profiles.set_recipient_status_if(
            &tx,
            recipient_id,
            RecipientStatus::Waiting,
            RecipientStatus::Matched,
        )? {
            return Err(MatchError::Conflict(format!(
                "recipient {recipient_id} was matched concurrently"
            )));
        }

        let now = Utc::now();
        let record = Match {
            id: Uuid::new_v4(),
            donor_id: *donor_id,
            recipient_id: *recipient_id,
            organ,
            compatibility_score: score,
            status: MatchStatus::Pending,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        self.matches.insert(&tx, &record)?;
        tx.commit()?;

        info!(
            match_id = %record.id,
            donor_id = %donor_id,
            recipient_id = %recipient_id,
            organ = %organ,
            score,
            hospital = %actor.user_id,
            "Match created"
        );
        Ok(record)
    }

    /// `pending → accepted`.
    pub fn accept(&self, conn: &Connection, match_id: &Uuid, actor: &Actor) -> Result<Match, MatchError> {
        self.step(conn, match_id, actor, Step::Accept)
    }

    /// `accepted → completed`.
    pub fn complete(&self, conn: &Connection, match_id: &Uuid, actor: &Actor) -> Result<Match, MatchError> {
        self.step(conn, match_id, actor, Step::Complete)
    }

    /// Apply whichever of accept/complete comes next.
    pub fn advance_match(
        &self,
        conn: &Connection,
        match_id: &Uuid,
        actor: &Actor,
    ) -> Result<Match, MatchError> {
        self.step(conn, match_id, actor, Step::Advance)
    }

    fn step(
        &self,
        conn: &Connection,
        match_id: &Uuid,
        actor: &Actor,
        step: Step,
    ) -> Result<Match, MatchError> {
        require_role(actor, &[UserRole::Hospital], "advancing a match")?;

        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

        let record = self
            .matches
            .get(&tx, match_id)?
            .ok_or_else(|| MatchError::not_found("Match", match_id))?;
        require_match_owner(actor, &record)?;

        let from = record.status;
        let to = match (step.required_status(), from.next()) {
            (Some(required), Some(next)) if required == from => next,
            (None, Some(next)) => next,
            _ => {
                warn!(match_id = %match_id, status = %from, "Out-of-order match transition");
                return Err(MatchError::InvalidStateTransition {
                    from,
                    to: step.target_name().to_string(),
                });
            }
        };

        if !self.matches.set_status_if(&tx, match_id, from, to)? {
            return Err(MatchError::Conflict(format!("match {match_id} changed concurrently")));
        }

        if to == MatchStatus::Completed && self.policy == OrganReleasePolicy::ReleaseRemaining {
            let donor = self.profiles.release_donor_organ(&tx, &record.donor_id, record.organ)?;
            let recipient = self
                .profiles
                .release_recipient_organ(&tx, &record.recipient_id, record.organ)?;
            info!(
                match_id = %match_id,
                donor_status = %donor.status,
                recipient_status = %recipient.status,
                "Organ released after completion"
            );
        }

        let updated = self
            .matches
            .get(&tx, match_id)?
            .ok_or_else(|| MatchError::not_found("Match", match_id))?;
        tx.commit()?;

        info!(match_id = %match_id, from = %from, to = %to, "Match advanced");
        Ok(updated)
    }

    /// Matches visible to the actor: their own for donors and recipients,
    /// everything for hospitals.
    pub fn list_matches(&self, conn: &Connection, actor: &Actor) -> Result<Vec<Match>, MatchError> {
        match actor.role {
            UserRole::Hospital => self.matches.list_all(conn),
            UserRole::Donor => match self.profiles.donor_for_user(conn, &actor.user_id)? {
                Some(donor) => self.matches.list_for_donor(conn, &donor.id),
                None => Ok(Vec::new()),
            },
            UserRole::Recipient => match self.profiles.recipient_for_user(conn, &actor.user_id)? {
                Some(recipient) => self.matches.list_for_recipient(conn, &recipient.id),
                None => Ok(Vec::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::db::repository::fixtures::*;
    use crate::db::sqlite::{open_database, open_memory_database};
    use crate::matching::error::ErrorKind;
    use crate::matching::store::{SqliteMatchStore, SqliteProfileStore};
    use crate::models::{BloodType, UrgencyLevel};

    fn lifecycle(policy: OrganReleasePolicy) -> MatchLifecycle<'static> {
        MatchLifecycle::new(&SqliteProfileStore, &SqliteMatchStore, policy)
    }

    fn hospital_actor(conn: &Connection) -> Actor {
        let (user, _) = make_hospital(conn);
        Actor::new(user.id, UserRole::Hospital)
    }

    fn donor_status(conn: &Connection, id: &Uuid) -> DonorStatus {
        SqliteProfileStore.get_donor(conn, id).unwrap().unwrap().status
    }

    fn recipient_status(conn: &Connection, id: &Uuid) -> RecipientStatus {
        SqliteProfileStore.get_recipient(conn, id).unwrap().unwrap().status
    }

    #[test]
    fn create_flips_both_statuses_and_stores_pending_match() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Heart, Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);

        let m = lifecycle(OrganReleasePolicy::Consume)
            .create_match(&conn, &donor.id, &recipient.id, Organ::Kidney, &hospital)
            .unwrap();

        assert_eq!(m.status, MatchStatus::Pending);
        assert_eq!(m.compatibility_score, 100);
        assert_eq!(m.created_by, hospital.user_id);
        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Matched);
        assert_eq!(recipient_status(&conn, &recipient.id), RecipientStatus::Matched);
        assert_eq!(SqliteMatchStore.get(&conn, &m.id).unwrap().unwrap(), m);
    }

    #[test]
    fn compatible_different_type_scores_80() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::ONeg, &[Organ::Liver]);
        let recipient = make_recipient(&conn, BloodType::BPos, &[Organ::Liver], UrgencyLevel::Low);

        let m = lifecycle(OrganReleasePolicy::Consume)
            .create_match(&conn, &donor.id, &recipient.id, Organ::Liver, &hospital)
            .unwrap();
        assert_eq!(m.compatibility_score, 80);
    }

    #[test]
    fn non_hospital_actor_is_unauthorized() {
        let conn = open_memory_database().unwrap();
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);
        let actor = Actor::new(donor.user_id, UserRole::Donor);

        let err = lifecycle(OrganReleasePolicy::Consume)
            .create_match(&conn, &donor.id, &recipient.id, Organ::Kidney, &actor)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Available);
    }

    #[test]
    fn missing_profiles_are_not_found() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Kidney]);
        let lc = lifecycle(OrganReleasePolicy::Consume);

        let err = lc
            .create_match(&conn, &donor.id, &Uuid::new_v4(), Organ::Kidney, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = lc
            .create_match(&conn, &Uuid::new_v4(), &Uuid::new_v4(), Organ::Kidney, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Available);
    }

    #[test]
    fn matched_donor_conflicts_and_leaves_state_unchanged() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::ONeg, &[Organ::Kidney, Organ::Liver]);
        let first = make_recipient(&conn, BloodType::APos, &[Organ::Kidney], UrgencyLevel::High);
        let second = make_recipient(&conn, BloodType::APos, &[Organ::Liver], UrgencyLevel::Critical);
        let lc = lifecycle(OrganReleasePolicy::Consume);

        lc.create_match(&conn, &donor.id, &first.id, Organ::Kidney, &hospital)
            .unwrap();
        let before = SqliteMatchStore.list_all(&conn).unwrap();

        let err = lc
            .create_match(&conn, &donor.id, &second.id, Organ::Liver, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Matched);
        assert_eq!(recipient_status(&conn, &second.id), RecipientStatus::Waiting);
        assert_eq!(SqliteMatchStore.list_all(&conn).unwrap(), before);
    }

    #[test]
    fn organ_and_blood_mismatches_are_invalid_arguments() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::AbPos, &[Organ::Kidney]);
        let compatible = make_recipient(&conn, BloodType::AbPos, &[Organ::Heart], UrgencyLevel::High);
        let incompatible = make_recipient(&conn, BloodType::ONeg, &[Organ::Kidney], UrgencyLevel::High);
        let lc = lifecycle(OrganReleasePolicy::Consume);

        let err = lc
            .create_match(&conn, &donor.id, &compatible.id, Organ::Heart, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = lc
            .create_match(&conn, &donor.id, &compatible.id, Organ::Kidney, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = lc
            .create_match(&conn, &donor.id, &incompatible.id, Organ::Kidney, &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Available);
        assert!(SqliteMatchStore.list_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn transitions_follow_linear_order() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::BNeg, &[Organ::Lungs]);
        let recipient = make_recipient(&conn, BloodType::BPos, &[Organ::Lungs], UrgencyLevel::Medium);
        let lc = lifecycle(OrganReleasePolicy::Consume);
        let m = lc
            .create_match(&conn, &donor.id, &recipient.id, Organ::Lungs, &hospital)
            .unwrap();

        let err = lc.complete(&conn, &m.id, &hospital).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
        assert_eq!(SqliteMatchStore.get(&conn, &m.id).unwrap().unwrap(), m);

        let accepted = lc.accept(&conn, &m.id, &hospital).unwrap();
        assert_eq!(accepted.status, MatchStatus::Accepted);
        assert!(accepted.updated_at >= m.updated_at);

        let err = lc.accept(&conn, &m.id, &hospital).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);

        let completed = lc.complete(&conn, &m.id, &hospital).unwrap();
        assert_eq!(completed.status, MatchStatus::Completed);
    }

    #[test]
    fn only_creating_hospital_may_advance() {
        let conn = open_memory_database().unwrap();
        let creator = hospital_actor(&conn);
        let other = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);
        let lc = lifecycle(OrganReleasePolicy::Consume);
        let m = lc
            .create_match(&conn, &donor.id, &recipient.id, Organ::Kidney, &creator)
            .unwrap();

        let err = lc.advance_match(&conn, &m.id, &other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            SqliteMatchStore.get(&conn, &m.id).unwrap().unwrap().status,
            MatchStatus::Pending
        );
    }

    #[test]
    fn advancing_unknown_match_is_not_found() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let err = lifecycle(OrganReleasePolicy::Consume)
            .advance_match(&conn, &Uuid::new_v4(), &hospital)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn consume_policy_keeps_parties_matched_after_completion() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Heart, Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);
        let lc = lifecycle(OrganReleasePolicy::Consume);
        let m = lc
            .create_match(&conn, &donor.id, &recipient.id, Organ::Kidney, &hospital)
            .unwrap();
        lc.advance_match(&conn, &m.id, &hospital).unwrap();
        lc.advance_match(&conn, &m.id, &hospital).unwrap();

        let stored = SqliteProfileStore.get_donor(&conn, &donor.id).unwrap().unwrap();
        assert_eq!(stored.status, DonorStatus::Matched);
        assert_eq!(stored.organs_available, donor.organs_available);
        assert_eq!(recipient_status(&conn, &recipient.id), RecipientStatus::Matched);
    }

    #[test]
    fn release_remaining_returns_donor_with_leftover_organs() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let donor = make_donor(&conn, BloodType::OPos, &[Organ::Heart, Organ::Kidney]);
        let recipient = make_recipient(&conn, BloodType::OPos, &[Organ::Kidney], UrgencyLevel::High);
        let lc = lifecycle(OrganReleasePolicy::ReleaseRemaining);
        let m = lc
            .create_match(&conn, &donor.id, &recipient.id, Organ::Kidney, &hospital)
            .unwrap();
        lc.accept(&conn, &m.id, &hospital).unwrap();

        // Nothing is released before completion.
        assert_eq!(donor_status(&conn, &donor.id), DonorStatus::Matched);

        lc.complete(&conn, &m.id, &hospital).unwrap();

        let stored = SqliteProfileStore.get_donor(&conn, &donor.id).unwrap().unwrap();
        assert_eq!(stored.status, DonorStatus::Available);
        assert_eq!(stored.organs_available, BTreeSet::from([Organ::Heart]));

        let stored = SqliteProfileStore.get_recipient(&conn, &recipient.id).unwrap().unwrap();
        assert_eq!(stored.status, RecipientStatus::Matched);
        assert!(stored.organs_needed.is_empty());
    }

    #[test]
    fn list_matches_is_scoped_by_role() {
        let conn = open_memory_database().unwrap();
        let hospital = hospital_actor(&conn);
        let d1 = make_donor(&conn, BloodType::ONeg, &[Organ::Heart]);
        let d2 = make_donor(&conn, BloodType::ONeg, &[Organ::Liver]);
        let r1 = make_recipient(&conn, BloodType::APos, &[Organ::Heart], UrgencyLevel::High);
        let r2 = make_recipient(&conn, BloodType::APos, &[Organ::Liver], UrgencyLevel::High);
        let lc = lifecycle(OrganReleasePolicy::Consume);
        let m1 = lc.create_match(&conn, &d1.id, &r1.id, Organ::Heart, &hospital).unwrap();
        let m2 = lc.create_match(&conn, &d2.id, &r2.id, Organ::Liver, &hospital).unwrap();

        assert_eq!(lc.list_matches(&conn, &hospital).unwrap().len(), 2);

        let mine = lc
            .list_matches(&conn, &Actor::new(d1.user_id, UserRole::Donor))
            .unwrap();
        assert_eq!(mine.iter().map(|m| m.id).collect::<Vec<_>>(), vec![m1.id]);

        let mine = lc
            .list_matches(&conn, &Actor::new(r2.user_id, UserRole::Recipient))
            .unwrap();
        assert_eq!(mine.iter().map(|m| m.id).collect::<Vec<_>>(), vec![m2.id]);

        // A recipient-role user without a profile sees nothing.
        let orphan = make_user(&conn, UserRole::Recipient);
        assert!(lc
            .list_matches(&conn, &Actor::new(orphan.id, UserRole::Recipient))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn concurrent_creates_for_same_donor_have_one_winner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");

        let (donor_id, r1, r2, h1, h2) = {
            let conn = open_database(&path).unwrap();
            let donor = make_donor(&conn, BloodType::ONeg, &[Organ::Kidney]);
            let r1 = make_recipient(&conn, BloodType::APos, &[Organ::Kidney], UrgencyLevel::High);
            let r2 = make_recipient(&conn, BloodType::BPos, &[Organ::Kidney], UrgencyLevel::High);
            (donor.id, r1.id, r2.id, hospital_actor(&conn), hospital_actor(&conn))
        };

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [(r1, h1), (r2, h2)]
            .into_iter()
            .map(|(recipient_id, hospital)| {
                let path = path.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let conn = open_database(&path).unwrap();
                    barrier.wait();
                    lifecycle(OrganReleasePolicy::Consume).create_match(
                        &conn,
                        &donor_id,
                        &recipient_id,
                        Organ::Kidney,
                        &hospital,
                    )
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Conflict))
            .count();
        assert_eq!((wins, conflicts), (1, 1));

        let conn = open_database(&path).unwrap();
        assert_eq!(SqliteMatchStore.list_all(&conn).unwrap().len(), 1);
        let waiting = SqliteProfileStore.waiting_recipients(&conn).unwrap();
        assert_eq!(waiting.len(), 1);
    }

    #[test]
    fn release_policy_parses_config_values() {
        assert_eq!(
            "release_remaining".parse::<OrganReleasePolicy>().unwrap(),
            OrganReleasePolicy::ReleaseRemaining
        );
        assert_eq!(OrganReleasePolicy::default(), OrganReleasePolicy::Consume);
        assert_eq!(OrganReleasePolicy::Consume.as_str(), "consume");
        assert!("forever".parse::<OrganReleasePolicy>().is_err());
    }
}
