//! Match endpoints.
//!
//! - `GET /api/matches`: matches visible to the caller
//! - `GET /api/matches/potential`: ranked candidate pairs
//! - `POST /api/matches`: hospital confirms a pair
//! - `POST /api/matches/:id/{advance,accept,complete}`: lifecycle steps

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ActorContext, ApiContext};
use crate::matching::CandidatePair;
use crate::models::{Match, Organ};

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub donor_id: Uuid,
    pub recipient_id: Uuid,
    pub organ: Organ,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let actor = caller.actor;
    let matches = ctx
        .with_db(move |core, conn| core.engine.list_matches(conn, &actor))
        .await?;
    Ok(Json(matches))
}

pub async fn potential(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
) -> Result<Json<Vec<CandidatePair>>, ApiError> {
    let actor = caller.actor;
    let pairs = ctx
        .with_db(move |core, conn| core.engine.potential_matches(conn, &actor))
        .await?;
    Ok(Json(pairs))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    ApiJson(request): ApiJson<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let actor = caller.actor;
    let record = ctx
        .with_db(move |core, conn| {
            core.engine.create_match(
                conn,
                &request.donor_id,
                &request.recipient_id,
                request.organ,
                &actor,
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn advance(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let match_id = parse_id(&raw_id)?;
    let actor = caller.actor;
    let record = ctx
        .with_db(move |core, conn| core.engine.advance_match(conn, &match_id, &actor))
        .await?;
    Ok(Json(record))
}

pub async fn accept(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let match_id = parse_id(&raw_id)?;
    let actor = caller.actor;
    let record = ctx
        .with_db(move |core, conn| core.engine.accept_match(conn, &match_id, &actor))
        .await?;
    Ok(Json(record))
}

pub async fn complete(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<ActorContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let match_id = parse_id(&raw_id)?;
    let actor = caller.actor;
    let record = ctx
        .with_db(move |core, conn| core.engine.complete_match(conn, &match_id, &actor))
        .await?;
    Ok(Json(record))
}
