//! Per-request security context.
//!
//! A `SecurityContext` is created fresh for every request by the filter chain,
//! threaded through each stage by value, and finally stored in that request's
//! extensions. Nothing here is global or shared between requests.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Prefix that turns a role name into its authority label (`ADMIN` -> `ROLE_ADMIN`).
pub const ROLE_PREFIX: &str = "ROLE_";

/// A single permission or role label granted to a principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GrantedAuthority {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An authenticated principal.
///
/// The credential that proved the identity is never retained: once the token
/// has been verified only the subject and its authorities are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authentication {
    principal: String,
    authorities: BTreeSet<GrantedAuthority>,
}

impl Authentication {
    pub fn new<I>(principal: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = GrantedAuthority>,
    {
        Self {
            principal: principal.into(),
            authorities: authorities.into_iter().collect(),
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn authorities(&self) -> &BTreeSet<GrantedAuthority> {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }

    /// Role check: `has_role("ADMIN")` looks for the `ROLE_ADMIN` authority.
    pub fn has_role(&self, role: &str) -> bool {
        let role = role.strip_prefix(ROLE_PREFIX).unwrap_or(role);
        self.authorities
            .iter()
            .filter_map(|a| a.as_str().strip_prefix(ROLE_PREFIX))
            .any(|granted| granted == role)
    }
}

/// Who is making the current request, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    authentication: Option<Authentication>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(authentication: Authentication) -> Self {
        Self {
            authentication: Some(authentication),
        }
    }

    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication.is_some()
    }

    pub fn set_authentication(&mut self, authentication: Authentication) {
        self.authentication = Some(authentication);
    }

    /// Drop any installed authentication.
    pub fn clear(&mut self) {
        self.authentication = None;
    }
}
