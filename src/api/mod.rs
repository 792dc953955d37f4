//! HTTP adapter for the matching engine.
//!
//! Routes are nested under `/api/`. Protected routes run behind
//! Auth → Audit middleware; health, compatibility lookups and account
//! creation/login are public.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use extract::ApiJson;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::{ActorContext, ApiContext};
