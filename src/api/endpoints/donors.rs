//! Donor profile endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ActorContext, ApiContext};
use crate::models::{DonorProfile, DonorProfileInput};
use crate::profiles;

/// `POST /api/donors`
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(input): ApiJson<DonorProfileInput>,
) -> Result<(StatusCode, Json<DonorProfile>), ApiError> {
    let actor = caller.actor;
    let donor = ctx
        .with_db(move |_, conn| profiles::create_donor_profile(conn, &actor, input))
        .await?;
    Ok((StatusCode::CREATED, Json(donor)))
}

/// `GET /api/donors`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<Vec<DonorProfile>>, ApiError> {
    let actor = caller.actor;
    let donors = ctx
        .with_db(move |_, conn| profiles::list_donor_profiles(conn, &actor))
        .await?;
    Ok(Json(donors))
}

/// `GET /api/donors/me`
pub async fn own(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<DonorProfile>, ApiError> {
    let actor = caller.actor;
    let donor = ctx
        .with_db(move |_, conn| profiles::own_donor_profile(conn, &actor))
        .await?;
    Ok(Json(donor))
}

/// `PUT /api/donors/me`
pub async fn update_own(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(input): ApiJson<DonorProfileInput>,
) -> Result<Json<DonorProfile>, ApiError> {
    let actor = caller.actor;
    let donor = ctx
        .with_db(move |_, conn| profiles::update_own_donor_profile(conn, &actor, input))
        .await?;
    Ok(Json(donor))
}
