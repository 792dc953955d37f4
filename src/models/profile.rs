use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BloodType, DonorStatus, Organ, RecipientStatus, UrgencyLevel};

/// Accepted age range for donor and recipient profiles.
pub const MAX_PROFILE_AGE: u8 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blood_type: BloodType,
    pub age: u8,
    pub organs_available: BTreeSet<Organ>,
    pub medical_history: Option<String>,
    pub status: DonorStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blood_type: BloodType,
    pub age: u8,
    pub organs_needed: BTreeSet<Organ>,
    pub urgency_level: UrgencyLevel,
    pub medical_history: Option<String>,
    pub status: RecipientStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospital_name: String,
    pub location: String,
    pub contact_number: String,
    pub created_at: DateTime<Utc>,
}

/// Editable donor fields, used for both creation and edits.
#[derive(Debug, Clone, Deserialize)]
pub struct DonorProfileInput {
    pub blood_type: BloodType,
    pub age: u8,
    pub organs_available: BTreeSet<Organ>,
    pub medical_history: Option<String>,
}

/// Editable recipient fields, used for both creation and edits.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientProfileInput {
    pub blood_type: BloodType,
    pub age: u8,
    pub organs_needed: BTreeSet<Organ>,
    pub urgency_level: UrgencyLevel,
    pub medical_history: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HospitalProfileInput {
    pub hospital_name: String,
    pub location: String,
    pub contact_number: String,
}

impl DonorProfile {
    /// New profiles start out available.
    pub fn new(user_id: Uuid, input: DonorProfileInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            blood_type: input.blood_type,
            age: input.age,
            organs_available: input.organs_available,
            medical_history: input.medical_history,
            status: DonorStatus::Available,
            created_at: Utc::now(),
        }
    }
}

impl RecipientProfile {
    /// New profiles start out waiting.
    pub fn new(user_id: Uuid, input: RecipientProfileInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            blood_type: input.blood_type,
            age: input.age,
            organs_needed: input.organs_needed,
            urgency_level: input.urgency_level,
            medical_history: input.medical_history,
            status: RecipientStatus::Waiting,
            created_at: Utc::now(),
        }
    }
}

impl HospitalProfile {
    pub fn new(user_id: Uuid, input: HospitalProfileInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            hospital_name: input.hospital_name,
            location: input.location,
            contact_number: input.contact_number,
            created_at: Utc::now(),
        }
    }
}
