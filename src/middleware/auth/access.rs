//! Runs the security filter chain and hands its `SecurityContext` to the rest
//! of the request via extensions.
//!
//! The context is built fresh for every request; nothing a client sends can
//! seed it, since extensions never come off the wire.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::security::StageOutcome;
use crate::state::AppState;

/// Apply the filter chain to every route of `router`.
///
/// ```ignore
/// let router = middleware::auth::authorize::apply(router, state.clone());
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
///
/// Layers added later run first, so `access` must be applied after
/// `authorize` for the policy to see the context.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    match state.chain.run(&parts) {
        StageOutcome::Continue(ctx) => {
            // middleware → extractor / policy
            parts.extensions.insert(ctx);
            next.run(Request::from_parts(parts, body)).await
        }
        StageOutcome::Respond(response) => response,
    }
}
