//! Error taxonomy for the matching engine.
//!
//! Every failure reaches the immediate caller with a stable kind and a
//! readable reason. Nothing here is retried.

use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::MatchStatus;

/// Stable, caller-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    Unauthorized,
    InvalidStateTransition,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::InvalidStateTransition => "invalid_state_transition",
            Self::Internal => "internal",
        }
    }
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid state transition: match is {from}, cannot move to {to}")]
    InvalidStateTransition { from: MatchStatus, to: String },

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            Self::Database(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }
}

impl From<DatabaseError> for MatchError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidEnum { field, value } => {
                MatchError::InvalidArgument(format!("unknown {field} value '{value}'"))
            }
            DatabaseError::NotFound { entity_type, id } => MatchError::NotFound {
                entity: match entity_type.as_str() {
                    "donor_profile" => "Donor",
                    "recipient_profile" => "Recipient",
                    "match" => "Match",
                    _ => "Record",
                },
                id,
            },
            other if other.is_unique_violation() => {
                MatchError::Conflict("a record with the same key already exists".into())
            }
            other => MatchError::Database(other),
        }
    }
}

impl From<rusqlite::Error> for MatchError {
    fn from(err: rusqlite::Error) -> Self {
        DatabaseError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_enum_maps_to_invalid_argument() {
        let err: MatchError = DatabaseError::InvalidEnum {
            field: "BloodType".into(),
            value: "Q+".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("Q+"));
    }

    #[test]
    fn sqlite_failures_are_internal() {
        let err: MatchError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn transition_message_names_both_states() {
        let err = MatchError::InvalidStateTransition {
            from: MatchStatus::Completed,
            to: "next".into(),
        };
        assert_eq!(err.kind().as_str(), "invalid_state_transition");
        assert!(err.to_string().contains("completed"));
    }
}
