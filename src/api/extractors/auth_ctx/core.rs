use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::security::{Authentication, SecurityContext};

/// Extractor for the authenticated principal.
///
/// Relies on the access middleware having inserted a `SecurityContext` into the
/// request extensions. Rejects with 401 when the context is missing or anonymous.
#[derive(Debug, Clone)]
pub struct AuthCtx(pub Authentication);

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(|ctx| ctx.authentication())
            .cloned()
            .map(AuthCtx)
            .ok_or(AppError::Unauthorized)
    }
}
