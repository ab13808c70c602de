use thiserror::Error;

use crate::security::chain::StageKind;

/// Failures while turning a presented token into an authentication.
///
/// Both kinds are recovered inside the filter chain: the request continues
/// with its security context cleared.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Bad signature, malformed structure, or outside its `nbf`/`exp` window.
    #[error("token invalid: {0}")]
    TokenInvalid(#[from] jsonwebtoken::errors::Error),
    /// Signature checked out but the subject or authorities claim has the wrong shape.
    #[error("claims malformed: {0}")]
    ClaimsMalformed(String),
}

pub type AccessResult<T> = Result<T, AccessError>;

/// Rejected filter-chain assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("stage {0} registered more than once")]
    Duplicate(StageKind),
    #[error("stage {later} registered ahead of {earlier}")]
    OutOfOrder { earlier: StageKind, later: StageKind },
}
