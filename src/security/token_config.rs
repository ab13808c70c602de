use std::fmt;

use axum::http::{HeaderMap, HeaderName, header};

/// Where a signed token is carried on a request and the key it is verified with.
///
/// Built once at startup and shared read-only behind an `Arc`. Issuer and
/// verifier must agree on the secret or every token fails verification.
#[derive(Clone)]
pub struct TokenConfig {
    header: HeaderName,
    prefix: String,
    secret: Vec<u8>,
    leeway_seconds: u64,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenConfig")
            .field("header", &self.header)
            .field("prefix", &self.prefix)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenConfig {
    pub fn new(header: HeaderName, prefix: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            header,
            prefix: prefix.into(),
            secret: secret.as_ref().to_vec(),
            leeway_seconds: 0,
        }
    }

    /// `Authorization: Bearer <token>`
    pub fn bearer(secret: impl AsRef<[u8]>) -> Self {
        Self::new(header::AUTHORIZATION, "Bearer ", secret)
    }

    /// Allowed clock skew when checking `exp`/`nbf`.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    /// Read the configured header and take the token off its prefix.
    ///
    /// Only a leading match is removed; the prefix text appearing later in the
    /// value is left alone.
    pub fn read_credential<'a>(&self, headers: &'a HeaderMap) -> Credential<'a> {
        let Some(value) = headers.get(&self.header) else {
            return Credential::Absent;
        };

        match value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix(self.prefix.as_str()))
        {
            Some(token) => Credential::Present(token),
            None => Credential::PrefixMismatch,
        }
    }
}

/// Outcome of looking for a token on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    Absent,
    PrefixMismatch,
    Present(&'a str),
}
