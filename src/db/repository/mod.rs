//! Repository layer: entity-scoped database operations.
//!
//! One sub-module per table. Functions take a borrowed `Connection` so callers
//! can run them inside a transaction (`Transaction` derefs to `Connection`).

mod donor;
mod hospital;
mod match_record;
mod recipient;
mod session;
mod user;

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::Organ;

pub use donor::*;
pub use hospital::*;
pub use match_record::*;
pub use recipient::*;
pub use session::*;
pub use user::*;

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid timestamp {value}: {e}")))
}

/// Organ sets are stored as a JSON array of wire names.
pub(crate) fn organs_to_json(organs: &BTreeSet<Organ>) -> String {
    let names: Vec<&str> = organs.iter().map(|o| o.as_str()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn organs_from_json(value: &str) -> Result<BTreeSet<Organ>, DatabaseError> {
    let names: Vec<String> = serde_json::from_str(value)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid organ list: {e}")))?;
    names.iter().map(|n| Organ::from_str(n)).collect()
}
