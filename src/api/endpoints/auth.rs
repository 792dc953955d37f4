//! Account endpoints.
//!
//! - `POST /api/auth/register`: create account, returns a bearer token
//! - `POST /api/auth/login`: verify credentials, returns a bearer token
//! - `GET /api/auth/me`: current user
//! - `POST /api/auth/logout`: revoke the presented token

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ActorContext, ApiContext};
use crate::identity::{self, AuthResponse, LoginRequest, RegisterRequest};
use crate::models::User;

pub async fn register(
    State(ctx): State<ApiContext>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = ctx
        .with_db(move |_, conn| identity::register(conn, request))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = ctx
        .with_db(move |_, conn| identity::login(conn, request))
        .await?;
    Ok(Json(response))
}

pub async fn me(Extension(caller): Extension<ActorContext>) -> Json<User> {
    Json(caller.user)
}

pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<StatusCode, ApiError> {
    let token = caller.token;
    ctx.with_db(move |_, conn| identity::logout(conn, &token))
        .await?;
    tracing::info!(user_id = %caller.actor.user_id, "Session revoked");
    Ok(StatusCode::NO_CONTENT)
}
