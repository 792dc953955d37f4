//! Hospital profile endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ActorContext, ApiContext};
use crate::models::{HospitalProfile, HospitalProfileInput};
use crate::profiles;

/// `POST /api/hospitals`
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(input): ApiJson<HospitalProfileInput>,
) -> Result<(StatusCode, Json<HospitalProfile>), ApiError> {
    let actor = caller.actor;
    let hospital = ctx
        .with_db(move |_, conn| profiles::create_hospital_profile(conn, &actor, input))
        .await?;
    Ok((StatusCode::CREATED, Json(hospital)))
}

/// `GET /api/hospitals/me`
pub async fn own(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<HospitalProfile>, ApiError> {
    let actor = caller.actor;
    let hospital = ctx
        .with_db(move |_, conn| profiles::own_hospital_profile(conn, &actor))
        .await?;
    Ok(Json(hospital))
}
