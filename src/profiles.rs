//! Profile management for donors, recipients and hospitals.
//!
//! A user owns at most one profile, of the kind matching their role. Status
//! fields are never edited here; they move only through the match lifecycle.

use rusqlite::Connection;

use crate::authorization::{require_role, Actor};
use crate::db::{repository, DatabaseError};
use crate::matching::MatchError;
use crate::models::{
    DonorProfile, DonorProfileInput, HospitalProfile, HospitalProfileInput, RecipientProfile,
    RecipientProfileInput, UserRole, MAX_PROFILE_AGE,
};

fn validate_age(age: u8) -> Result<(), MatchError> {
    if age > MAX_PROFILE_AGE {
        return Err(MatchError::InvalidArgument(format!(
            "age {age} is outside 0..={MAX_PROFILE_AGE}"
        )));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), MatchError> {
    if value.trim().is_empty() {
        return Err(MatchError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(())
}

/// The existence check and the insert are separate statements, so a
/// concurrent create can still trip the `user_id` unique index.
fn insert_or_conflict(result: Result<(), DatabaseError>, profile: &str) -> Result<(), MatchError> {
    result.map_err(|e| {
        if e.is_unique_violation() {
            MatchError::Conflict(format!("{profile} already exists"))
        } else {
            e.into()
        }
    })
}

// ── Donors ──────────────────────────────────────────────────

pub fn create_donor_profile(
    conn: &Connection,
    actor: &Actor,
    input: DonorProfileInput,
) -> Result<DonorProfile, MatchError> {
    require_role(actor, &[UserRole::Donor], "creating a donor profile")?;
    validate_age(input.age)?;
    if repository::get_donor_by_user(conn, &actor.user_id)?.is_some() {
        return Err(MatchError::Conflict("donor profile already exists".into()));
    }

    let donor = DonorProfile::new(actor.user_id, input);
    insert_or_conflict(repository::insert_donor(conn, &donor), "donor profile")?;
    tracing::info!(donor_id = %donor.id, blood_type = %donor.blood_type, "Donor profile created");
    Ok(donor)
}

pub fn own_donor_profile(conn: &Connection, actor: &Actor) -> Result<DonorProfile, MatchError> {
    require_role(actor, &[UserRole::Donor], "reading a donor profile")?;
    repository::get_donor_by_user(conn, &actor.user_id)?
        .ok_or_else(|| MatchError::not_found("Donor profile", actor.user_id))
}

pub fn update_own_donor_profile(
    conn: &Connection,
    actor: &Actor,
    input: DonorProfileInput,
) -> Result<DonorProfile, MatchError> {
    require_role(actor, &[UserRole::Donor], "editing a donor profile")?;
    validate_age(input.age)?;
    repository::update_donor_by_user(conn, &actor.user_id, &input)?
        .ok_or_else(|| MatchError::not_found("Donor profile", actor.user_id))
}

pub fn list_donor_profiles(conn: &Connection, actor: &Actor) -> Result<Vec<DonorProfile>, MatchError> {
    require_role(actor, &[UserRole::Hospital, UserRole::Recipient], "listing donors")?;
    Ok(repository::list_donors(conn)?)
}

// ── Recipients ──────────────────────────────────────────────

pub fn create_recipient_profile(
    conn: &Connection,
    actor: &Actor,
    input: RecipientProfileInput,
) -> Result<RecipientProfile, MatchError> {
    require_role(actor, &[UserRole::Recipient], "creating a recipient profile")?;
    validate_age(input.age)?;
    if repository::get_recipient_by_user(conn, &actor.user_id)?.is_some() {
        return Err(MatchError::Conflict("recipient profile already exists".into()));
    }

    let recipient = RecipientProfile::new(actor.user_id, input);
    insert_or_conflict(repository::insert_recipient(conn, &recipient), "recipient profile")?;
    tracing::info!(
        recipient_id = %recipient.id,
        urgency = %recipient.urgency_level,
        "Recipient profile created"
    );
    Ok(recipient)
}

pub fn own_recipient_profile(conn: &Connection, actor: &Actor) -> Result<RecipientProfile, MatchError> {
    require_role(actor, &[UserRole::Recipient], "reading a recipient profile")?;
    repository::get_recipient_by_user(conn, &actor.user_id)?
        .ok_or_else(|| MatchError::not_found("Recipient profile", actor.user_id))
}

pub fn update_own_recipient_profile(
    conn: &Connection,
    actor: &Actor,
    input: RecipientProfileInput,
) -> Result<RecipientProfile, MatchError> {
    require_role(actor, &[UserRole::Recipient], "editing a recipient profile")?;
    validate_age(input.age)?;
    repository::update_recipient_by_user(conn, &actor.user_id, &input)?
        .ok_or_else(|| MatchError::not_found("Recipient profile", actor.user_id))
}

pub fn list_recipient_profiles(
    conn: &Connection,
    actor: &Actor,
) -> Result<Vec<RecipientProfile>, MatchError> {
    require_role(actor, &[UserRole::Hospital, UserRole::Donor], "listing recipients")?;
    Ok(repository::list_recipients(conn)?)
}

// ── Hospitals ───────────────────────────────────────────────

pub fn create_hospital_profile(
    conn: &Connection,
    actor: &Actor,
    input: HospitalProfileInput,
) -> Result<HospitalProfile, MatchError> {
    require_role(actor, &[UserRole::Hospital], "creating a hospital profile")?;
    require_text("hospital_name", &input.hospital_name)?;
    if repository::get_hospital_by_user(conn, &actor.user_id)?.is_some() {
        return Err(MatchError::Conflict("hospital profile already exists".into()));
    }

    let hospital = HospitalProfile::new(actor.user_id, input);
    insert_or_conflict(repository::insert_hospital(conn, &hospital), "hospital profile")?;
    tracing::info!(hospital_id = %hospital.id, "Hospital profile created");
    Ok(hospital)
}

pub fn own_hospital_profile(conn: &Connection, actor: &Actor) -> Result<HospitalProfile, MatchError> {
    require_role(actor, &[UserRole::Hospital], "reading a hospital profile")?;
    repository::get_hospital_by_user(conn, &actor.user_id)?
        .ok_or_else(|| MatchError::not_found("Hospital profile", actor.user_id))
}
