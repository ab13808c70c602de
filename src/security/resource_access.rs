//! Bearer token validation → authentication in the request's `SecurityContext`.
//!
//! This stage never rejects a request. A missing or unusable credential only
//! means the request goes on unauthenticated; whether that is acceptable for
//! the route is decided later by the access policy.
//!
//! | Outcome          | Context            |
//! |------------------|--------------------|
//! | header absent    | unchanged          |
//! | prefix mismatch  | unchanged          |
//! | no subject       | unchanged          |
//! | authenticated    | replaced           |
//! | token invalid    | cleared            |
//! | claims malformed | cleared            |

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::security::chain::{Stage, StageKind, StageOutcome};
use crate::security::claims::AccessClaims;
use crate::security::context::{Authentication, SecurityContext};
use crate::security::error::AccessResult;
use crate::security::token_config::{Credential, TokenConfig};
use crate::security::verifier::TokenVerifier;

/// What a request's credential amounted to, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    HeaderAbsent,
    PrefixMismatch,
    /// Verified token that names no subject.
    SubjectAbsent,
    Authenticated(Authentication),
}

#[derive(Debug, Clone)]
pub struct ResourceAccessFilter {
    config: Arc<TokenConfig>,
    verifier: TokenVerifier,
}

impl ResourceAccessFilter {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let verifier = TokenVerifier::new(&config);
        Self { config, verifier }
    }

    /// Classify the request's credential without touching any context.
    pub fn resolve(&self, headers: &HeaderMap) -> AccessResult<Resolution> {
        let token = match self.config.read_credential(headers) {
            Credential::Absent => return Ok(Resolution::HeaderAbsent),
            Credential::PrefixMismatch => return Ok(Resolution::PrefixMismatch),
            Credential::Present(token) => token,
        };

        let payload = self.verifier.verify(token)?;

        Ok(match AccessClaims::from_payload(&payload)? {
            Some(claims) => Resolution::Authenticated(claims.into_authentication()),
            None => Resolution::SubjectAbsent,
        })
    }

    /// Apply the credential on `headers` to `ctx`.
    pub fn apply(&self, headers: &HeaderMap, mut ctx: SecurityContext) -> SecurityContext {
        match self.resolve(headers) {
            Ok(Resolution::HeaderAbsent) | Ok(Resolution::PrefixMismatch) => {
                tracing::debug!(header = %self.config.header(), "no resource access token on request");
            }
            Ok(Resolution::SubjectAbsent) => {
                tracing::debug!("resource access token carries no subject");
            }
            Ok(Resolution::Authenticated(authentication)) => {
                tracing::debug!(
                    principal = %authentication.principal(),
                    authorities = authentication.authorities().len(),
                    "resource access token accepted"
                );
                ctx.set_authentication(authentication);
            }
            Err(err) => {
                tracing::warn!(error = %err, "resource access token rejected; clearing security context");
                ctx.clear();
            }
        }
        ctx
    }
}

impl Stage for ResourceAccessFilter {
    fn kind(&self) -> StageKind {
        StageKind::ResourceAccess
    }

    fn process(&self, parts: &Parts, ctx: SecurityContext) -> StageOutcome {
        StageOutcome::Continue(self.apply(&parts.headers, ctx))
    }
}
