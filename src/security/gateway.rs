use std::sync::Arc;

use axum::http::request::Parts;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::security::chain::{Stage, StageKind, StageOutcome};
use crate::security::context::SecurityContext;
use crate::security::token_config::{Credential, TokenConfig};
use crate::security::verifier::TokenVerifier;

/// Rejects requests that did not pass through the trusted gateway.
///
/// The gateway stamps each forwarded request with a token signed by a secret
/// only it and this service know. No identity is taken from that token.
#[derive(Debug, Clone)]
pub struct GatewayAssertionFilter {
    config: Arc<TokenConfig>,
    verifier: TokenVerifier,
}

impl GatewayAssertionFilter {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let verifier = TokenVerifier::new(&config);
        Self { config, verifier }
    }
}

impl Stage for GatewayAssertionFilter {
    fn kind(&self) -> StageKind {
        StageKind::GatewayAssertion
    }

    fn process(&self, parts: &Parts, ctx: SecurityContext) -> StageOutcome {
        let token = match self.config.read_credential(&parts.headers) {
            Credential::Present(token) => token,
            Credential::Absent | Credential::PrefixMismatch => {
                tracing::warn!(
                    header = %self.config.header(),
                    path = %parts.uri.path(),
                    "request did not come through the gateway"
                );
                return StageOutcome::Respond(AppError::Unauthorized.into_response());
            }
        };

        match self.verifier.verify(token) {
            Ok(_) => StageOutcome::Continue(ctx),
            Err(err) => {
                tracing::warn!(error = %err, path = %parts.uri.path(), "gateway token rejected");
                StageOutcome::Respond(AppError::Unauthorized.into_response())
            }
        }
    }
}
