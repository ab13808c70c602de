use serde::Deserialize;
use serde_json::Value;

use crate::security::context::{Authentication, GrantedAuthority};
use crate::security::error::{AccessError, AccessResult};

pub const SUBJECT_CLAIM: &str = "sub";
pub const AUTHORITIES_CLAIM: &str = "authorities";

/// Claims of a verified access token that carry an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub subject: String,
    pub authorities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SubjectRepr {
    #[serde(default)]
    sub: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthoritiesRepr {
    authorities: Vec<String>,
}

impl AccessClaims {
    /// Decode the identity part of an already verified payload.
    ///
    /// `Ok(None)` when the subject is absent or null: the token is well formed but
    /// does not identify anyone. The authorities claim is only inspected once a
    /// subject is present, and must then be a list of strings.
    pub fn from_payload(payload: &Value) -> AccessResult<Option<Self>> {
        let subject = SubjectRepr::deserialize(payload)
            .map_err(|err| AccessError::ClaimsMalformed(format!("{SUBJECT_CLAIM}: {err}")))?
            .sub;

        let Some(subject) = subject else {
            return Ok(None);
        };

        let authorities = AuthoritiesRepr::deserialize(payload)
            .map_err(|err| AccessError::ClaimsMalformed(format!("{AUTHORITIES_CLAIM}: {err}")))?
            .authorities;

        Ok(Some(Self {
            subject,
            authorities,
        }))
    }

    pub fn into_authentication(self) -> Authentication {
        Authentication::new(
            self.subject,
            self.authorities.into_iter().map(GrantedAuthority::from),
        )
    }
}
