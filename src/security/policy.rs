//! Route access rules consulted after the filter chain has run.
//!
//! Rules are checked in declaration order and the first one matching the
//! request's method and path decides. Requests no rule matches fall back to
//! the policy default.

use std::fmt;

use axum::http::Method;

use crate::security::context::SecurityContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// `/users` (a trailing slash on the request path is tolerated)
    Exact(String),
    /// `/users/**`: the base path and everything below it
    Prefix(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(base) => Self::Prefix(base.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => {
                path == expected || path.strip_suffix('/') == Some(expected.as_str())
            }
            Self::Prefix(base) => match path.strip_prefix(base.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => f.write_str(path),
            Self::Prefix(base) => write!(f, "{base}/**"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    /// Role name without the `ROLE_` prefix.
    Role(String),
    Authority(String),
}

impl Requirement {
    pub fn evaluate(&self, ctx: &SecurityContext) -> Decision {
        if matches!(self, Self::Public) {
            return Decision::Permit;
        }

        let Some(auth) = ctx.authentication() else {
            return Decision::Unauthenticated;
        };

        let granted = match self {
            Self::Public | Self::Authenticated => true,
            Self::Role(role) => auth.has_role(role),
            Self::Authority(authority) => auth.has_authority(authority),
        };

        if granted {
            Decision::Permit
        } else {
            Decision::Forbidden
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("permitAll"),
            Self::Authenticated => f.write_str("authenticated"),
            Self::Role(role) => write!(f, "hasRole({role})"),
            Self::Authority(authority) => write!(f, "hasAuthority({authority})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    /// No authentication on a route that needs one.
    Unauthenticated,
    /// Authenticated, but without the required authority.
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    /// `None` matches any method.
    pub method: Option<Method>,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    default: Requirement,
}

impl AccessPolicy {
    pub fn new(default: Requirement) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    pub fn rule(mut self, method: Option<Method>, pattern: &str, requirement: Requirement) -> Self {
        self.rules.push(AccessRule {
            method,
            pattern: PathPattern::parse(pattern),
            requirement,
        });
        self
    }

    /// The service's route table.
    pub fn standard() -> Self {
        Self::new(Requirement::Authenticated)
            // registration and availability checks happen before an account exists
            .rule(Some(Method::POST), "/users", Requirement::Public)
            .rule(Some(Method::GET), "/users/isAvailable", Requirement::Public)
            // load balancer target group monitoring
            .rule(Some(Method::GET), "/actuator/info", Requirement::Public)
            .rule(Some(Method::GET), "/actuator/routes", Requirement::Public)
            .rule(None, "/admin-console/**", Requirement::Role("ADMIN".into()))
            .rule(Some(Method::GET), "/users/**", Requirement::Role("ADMIN".into()))
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn default_requirement(&self) -> &Requirement {
        &self.default
    }

    pub fn requirement_for(&self, method: &Method, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&self.default)
    }

    pub fn decide(&self, method: &Method, path: &str, ctx: &SecurityContext) -> Decision {
        self.requirement_for(method, path).evaluate(ctx)
    }
}
