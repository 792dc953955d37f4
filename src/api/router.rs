//! LifeLink API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack on protected routes (outermost → innermost):
//! 1. Auth validator → 2. Audit logger

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(core: Arc<CoreState>) -> Router {
    let cors = cors_layer(core.config.cors_origins.as_deref());
    let ctx = ApiContext::new(core);
    build_router(ctx).layer(cors)
}

fn build_router(ctx: ApiContext) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Auth → Audit (innermost) → Handler
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/auth/me", get(endpoints::auth::me))
        .route("/auth/logout", post(endpoints::auth::logout))
        .route(
            "/donors",
            get(endpoints::donors::list).post(endpoints::donors::create),
        )
        .route(
            "/donors/me",
            get(endpoints::donors::own).put(endpoints::donors::update_own),
        )
        .route(
            "/recipients",
            get(endpoints::recipients::list).post(endpoints::recipients::create),
        )
        .route(
            "/recipients/me",
            get(endpoints::recipients::own).put(endpoints::recipients::update_own),
        )
        .route("/hospitals", post(endpoints::hospitals::create))
        .route("/hospitals/me", get(endpoints::hospitals::own))
        .route(
            "/matches",
            get(endpoints::matches::list).post(endpoints::matches::create),
        )
        .route("/matches/potential", get(endpoints::matches::potential))
        .route("/matches/:id/advance", post(endpoints::matches::advance))
        .route("/matches/:id/accept", post(endpoints::matches::accept))
        .route("/matches/:id/complete", post(endpoints::matches::complete))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes (no auth required)
    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/compatibility/:blood_type",
            get(endpoints::compatibility::for_recipient),
        )
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .with_state(ctx.clone())
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
}

/// Any origin when none are configured, else exactly the listed ones.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
