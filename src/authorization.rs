//! Actor-based authorization for matching operations.
//!
//! Rules, checked in order, default deny:
//! 1. Creating or advancing a match requires a hospital actor.
//! 2. A match may only be advanced by the hospital user that created it.
//! 3. Profile edits are restricted to the role that owns that profile kind.
//!
//! The identity layer vouches for the role; these checks never consult storage.

use serde::Serialize;
use uuid::Uuid;

use crate::matching::MatchError;
use crate::models::{Match, UserRole};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Authenticated caller attached to every core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_hospital(&self) -> bool {
        self.role == UserRole::Hospital
    }
}

// ═══════════════════════════════════════════════════════════
// Checks
// ═══════════════════════════════════════════════════════════

/// Fail with `Unauthorized` unless the actor holds one of `allowed`.
pub fn require_role(actor: &Actor, allowed: &[UserRole], action: &str) -> Result<(), MatchError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(MatchError::Unauthorized(format!(
        "{action} requires role {}, caller is {}",
        names.join(" or "),
        actor.role
    )))
}

/// Only the creating hospital may move a match forward.
pub fn require_match_owner(actor: &Actor, record: &Match) -> Result<(), MatchError> {
    if !actor.is_hospital() {
        return Err(MatchError::Unauthorized(format!(
            "advancing a match requires role hospital, caller is {}",
            actor.role
        )));
    }
    if record.created_by != actor.user_id {
        return Err(MatchError::Unauthorized(format!(
            "match {} was created by another hospital",
            record.id
        )));
    }
    Ok(())
}
