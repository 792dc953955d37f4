//! Audit logging middleware.
//!
//! Logs every protected request with user id, role, method, path and
//! response status. Runs innermost (after auth has injected `ActorContext`).

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::ActorContext;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let actor = req.extensions().get::<ActorContext>().map(|c| c.actor);
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match actor {
        Some(actor) => tracing::info!(
            user_id = %actor.user_id,
            role = %actor.role,
            %method,
            %path,
            status,
            elapsed_ms,
            "API access"
        ),
        None => tracing::info!(%method, %path, status, elapsed_ms, "API access"),
    }

    response
}
