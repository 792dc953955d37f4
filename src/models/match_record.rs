use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{MatchStatus, Organ};

/// A hospital-confirmed donor/recipient/organ assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub recipient_id: Uuid,
    pub organ: Organ,
    pub compatibility_score: u8,
    pub status: MatchStatus,
    /// User id of the hospital that created the match.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
