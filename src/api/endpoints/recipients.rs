//! Recipient profile endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ActorContext, ApiContext};
use crate::models::{RecipientProfile, RecipientProfileInput};
use crate::profiles;

/// `POST /api/recipients`
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(input): ApiJson<RecipientProfileInput>,
) -> Result<(StatusCode, Json<RecipientProfile>), ApiError> {
    let actor = caller.actor;
    let recipient = ctx
        .with_db(move |_, conn| profiles::create_recipient_profile(conn, &actor, input))
        .await?;
    Ok((StatusCode::CREATED, Json(recipient)))
}

/// `GET /api/recipients`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<Vec<RecipientProfile>>, ApiError> {
    let actor = caller.actor;
    let recipients = ctx
        .with_db(move |_, conn| profiles::list_recipient_profiles(conn, &actor))
        .await?;
    Ok(Json(recipients))
}

/// `GET /api/recipients/me`
pub async fn own(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<RecipientProfile>, ApiError> {
    let actor = caller.actor;
    let recipient = ctx
        .with_db(move |_, conn| profiles::own_recipient_profile(conn, &actor))
        .await?;
    Ok(Json(recipient))
}

/// `PUT /api/recipients/me`
pub async fn update_own(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(input): ApiJson<RecipientProfileInput>,
) -> Result<Json<RecipientProfile>, ApiError> {
    let actor = caller.actor;
    let recipient = ctx
        .with_db(move |_, conn| profiles::update_own_recipient_profile(conn, &actor, input))
        .await?;
    Ok(Json(recipient))
}
