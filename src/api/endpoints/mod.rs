//! API endpoint handlers.
//!
//! Handlers are thin: they resolve the caller, hop onto the blocking pool
//! with a fresh connection, and call into `identity`, `profiles` or the
//! matching engine.

pub mod auth;
pub mod compatibility;
pub mod donors;
pub mod health;
pub mod hospitals;
pub mod matches;
pub mod recipients;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a path id, answering 400 in the API error shape on bad input.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("'{raw}' is not a valid id")))
}
