//! Request authentication: token checks, per-request security context, route policy.

pub mod chain;
pub mod claims;
pub mod context;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod policy;
pub mod resource_access;
pub mod token_config;
pub mod verifier;

pub use chain::{FilterChain, STAGE_ORDER, Stage, StageKind, StageOutcome};
pub use context::{Authentication, GrantedAuthority, SecurityContext};
pub use error::{AccessError, ChainError};
pub use factory::build_filter_chain;
pub use gateway::GatewayAssertionFilter;
pub use policy::{AccessPolicy, AccessRule, Decision, PathPattern, Requirement};
pub use resource_access::{ResourceAccessFilter, Resolution};
pub use token_config::{Credential, TokenConfig};
pub use verifier::TokenVerifier;
