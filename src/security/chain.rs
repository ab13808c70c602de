//! Ordered request stages that build a request's `SecurityContext`.
//!
//! The relative order of stages is fixed by `StageKind`:
//!
//! 1. `GatewayAssertion` - the request came through the trusted gateway.
//! 2. `PrimaryAuthentication` - explicit login, may install an authentication.
//! 3. `ResourceAccess` - bearer token validation.
//!
//! Any stage may be left out, but the ones present must follow this order and
//! appear once. Each stage either continues with a (possibly changed) context
//! or answers the request itself.

use std::fmt;
use std::sync::Arc;

use axum::http::request::Parts;
use axum::response::Response;

use crate::security::context::SecurityContext;
use crate::security::error::ChainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    GatewayAssertion,
    PrimaryAuthentication,
    ResourceAccess,
}

/// Run order, first to last.
pub const STAGE_ORDER: [StageKind; 3] = [
    StageKind::GatewayAssertion,
    StageKind::PrimaryAuthentication,
    StageKind::ResourceAccess,
];

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::GatewayAssertion => "gateway_assertion",
            StageKind::PrimaryAuthentication => "primary_authentication",
            StageKind::ResourceAccess => "resource_access",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum StageOutcome {
    Continue(SecurityContext),
    /// Stop here; later stages and the handler never see the request.
    Respond(Response),
}

/// One step of the chain.
///
/// Stages are synchronous: token checks are CPU-bound and have no I/O.
pub trait Stage: Send + Sync {
    fn kind(&self) -> StageKind;

    fn process(&self, parts: &Parts, ctx: SecurityContext) -> StageOutcome;
}

#[derive(Clone, Default)]
pub struct FilterChain {
    stages: Vec<Arc<dyn Stage>>,
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("stages", &self.kinds())
            .finish()
    }
}

impl FilterChain {
    pub fn builder() -> FilterChainBuilder {
        FilterChainBuilder::default()
    }

    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|s| s.kind()).collect()
    }

    /// Run every stage against a fresh anonymous context.
    pub fn run(&self, parts: &Parts) -> StageOutcome {
        let mut ctx = SecurityContext::anonymous();

        for stage in &self.stages {
            match stage.process(parts, ctx) {
                StageOutcome::Continue(next) => ctx = next,
                StageOutcome::Respond(response) => {
                    tracing::debug!(stage = %stage.kind(), "request short-circuited");
                    return StageOutcome::Respond(response);
                }
            }
        }

        StageOutcome::Continue(ctx)
    }
}

#[derive(Default)]
pub struct FilterChainBuilder {
    stages: Vec<Arc<dyn Stage>>,
}

impl FilterChainBuilder {
    pub fn stage<S>(mut self, stage: S) -> Self
    where
        S: Stage + 'static,
    {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Check the registered stages against `STAGE_ORDER`.
    pub fn build(self) -> Result<FilterChain, ChainError> {
        for pair in self.stages.windows(2) {
            let (prev, next) = (pair[0].kind(), pair[1].kind());
            if prev == next {
                return Err(ChainError::Duplicate(prev));
            }
            if rank(prev) > rank(next) {
                return Err(ChainError::OutOfOrder {
                    earlier: next,
                    later: prev,
                });
            }
        }

        Ok(FilterChain {
            stages: self.stages,
        })
    }
}

fn rank(kind: StageKind) -> usize {
    STAGE_ORDER
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(STAGE_ORDER.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::security::context::{Authentication, GrantedAuthority};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use std::sync::Mutex;

    struct Recording {
        kind: StageKind,
        seen: Arc<Mutex<Vec<(StageKind, bool)>>>,
    }

    impl Stage for Recording {
        fn kind(&self) -> StageKind {
            self.kind
        }

        fn process(&self, _parts: &Parts, ctx: SecurityContext) -> StageOutcome {
            self.seen
                .lock()
                .expect("lock")
                .push((self.kind, ctx.is_authenticated()));
            StageOutcome::Continue(ctx)
        }
    }

    struct Login;

    impl Stage for Login {
        fn kind(&self) -> StageKind {
            StageKind::PrimaryAuthentication
        }

        fn process(&self, _parts: &Parts, mut ctx: SecurityContext) -> StageOutcome {
            ctx.set_authentication(Authentication::new(
                "carol",
                [GrantedAuthority::new("ROLE_USER")],
            ));
            StageOutcome::Continue(ctx)
        }
    }

    struct Reject;

    impl Stage for Reject {
        fn kind(&self) -> StageKind {
            StageKind::GatewayAssertion
        }

        fn process(&self, _parts: &Parts, _ctx: SecurityContext) -> StageOutcome {
            StageOutcome::Respond(AppError::Unauthorized.into_response())
        }
    }

    fn parts() -> Parts {
        Request::builder()
            .uri("/anything")
            .body(Body::empty())
            .expect("request")
            .into_parts()
            .0
    }

    #[test]
    fn stages_run_in_declared_order_and_share_context() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = FilterChain::builder()
            .stage(Recording {
                kind: StageKind::GatewayAssertion,
                seen: seen.clone(),
            })
            .stage(Login)
            .stage(Recording {
                kind: StageKind::ResourceAccess,
                seen: seen.clone(),
            })
            .build()
            .expect("valid order");

        let StageOutcome::Continue(ctx) = chain.run(&parts()) else {
            panic!("chain should continue");
        };

        assert_eq!(
            *seen.lock().expect("lock"),
            vec![
                (StageKind::GatewayAssertion, false),
                (StageKind::ResourceAccess, true),
            ]
        );
        assert_eq!(ctx.authentication().map(|a| a.principal()), Some("carol"));
    }

    #[test]
    fn short_circuit_skips_later_stages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = FilterChain::builder()
            .stage(Reject)
            .stage(Recording {
                kind: StageKind::ResourceAccess,
                seen: seen.clone(),
            })
            .build()
            .expect("valid order");

        match chain.run(&parts()) {
            StageOutcome::Respond(response) => {
                assert_eq!(response.status(), StatusCode::UNAUTHORIZED)
            }
            StageOutcome::Continue(_) => panic!("chain should stop"),
        }
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn rejects_out_of_order_stages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let err = FilterChain::builder()
            .stage(Recording {
                kind: StageKind::ResourceAccess,
                seen,
            })
            .stage(Login)
            .build()
            .expect_err("resource access may not precede login");

        assert_eq!(
            err,
            ChainError::OutOfOrder {
                earlier: StageKind::PrimaryAuthentication,
                later: StageKind::ResourceAccess,
            }
        );
    }

    #[test]
    fn rejects_duplicate_stage() {
        let err = FilterChain::builder()
            .stage(Login)
            .stage(Login)
            .build()
            .expect_err("duplicate");
        assert_eq!(err, ChainError::Duplicate(StageKind::PrimaryAuthentication));
    }

    #[test]
    fn empty_chain_yields_anonymous_context() {
        let chain = FilterChain::builder().build().expect("empty chain");
        assert!(chain.kinds().is_empty());
        assert!(matches!(
            chain.run(&parts()),
            StageOutcome::Continue(ctx) if !ctx.is_authenticated()
        ));
    }
}
