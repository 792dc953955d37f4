//! `GET /api/compatibility/:blood_type`: which donor types a recipient accepts.

use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::matching::{compatibility_score, compatible_donors_for, MatchError};
use crate::models::BloodType;

#[derive(Serialize)]
pub struct DonorTypeScore {
    pub blood_type: BloodType,
    pub score: u8,
}

#[derive(Serialize)]
pub struct CompatibilityResponse {
    pub recipient_blood_type: BloodType,
    pub compatible_donor_types: Vec<DonorTypeScore>,
}

pub async fn for_recipient(
    Path(raw): Path<String>,
) -> Result<Json<CompatibilityResponse>, ApiError> {
    let recipient: BloodType = raw.parse().map_err(MatchError::from)?;

    let compatible_donor_types = compatible_donors_for(recipient)
        .into_iter()
        .filter_map(|donor| {
            compatibility_score(donor, recipient).map(|score| DonorTypeScore {
                blood_type: donor,
                score,
            })
        })
        .collect();

    Ok(Json(CompatibilityResponse {
        recipient_blood_type: recipient,
        compatible_donor_types,
    }))
}
