//! Matching engine: compatibility rule, pair generation, ranking and the
//! match lifecycle.
//!
//! Pure stages (`compatibility`, `pairs`, `ranking`) never touch storage.
//! `lifecycle` persists through the `ProfileStore` / `MatchStore` traits;
//! `engine` is the façade the API layer calls.

pub mod compatibility;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod pairs;
pub mod ranking;
pub mod store;
pub mod traits;

pub use compatibility::{compatibility_score, compatible_donors_for, is_compatible};
pub use engine::MatchingEngine;
pub use error::{ErrorKind, MatchError};
pub use lifecycle::{MatchLifecycle, OrganReleasePolicy};
pub use pairs::{evaluate_pair, generate_candidate_pairs, CandidatePair, PairEvaluation, RejectReason};
pub use ranking::rank;
pub use store::{SqliteMatchStore, SqliteProfileStore};
pub use traits::{MatchStore, ProfileStore};
