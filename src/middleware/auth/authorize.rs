//! Enforces the `AccessPolicy` route table against the request's context.
//!
//! Missing authentication on a protected route answers 401; an authentication
//! without the required authority answers 403.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::security::{Decision, SecurityContext};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, authorize_middleware))
}

async fn authorize_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let anonymous = SecurityContext::anonymous();
    let ctx = req
        .extensions()
        .get::<SecurityContext>()
        .unwrap_or(&anonymous);

    match state.policy.decide(req.method(), req.uri().path(), ctx) {
        Decision::Permit => Ok(next.run(req).await),
        Decision::Unauthenticated => {
            tracing::debug!(path = %req.uri().path(), "authentication required");
            Err(AppError::Unauthorized)
        }
        Decision::Forbidden => {
            tracing::warn!(
                path = %req.uri().path(),
                principal = ctx.authentication().map(|a| a.principal()).unwrap_or("-"),
                "access denied"
            );
            Err(AppError::Forbidden)
        }
    }
}
