use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::security::error::AccessResult;
use crate::security::token_config::TokenConfig;

/// HMAC-signed token verifier.
///
/// Checks the signature and the compact structure. `exp` and `nbf` are
/// enforced when the token carries them; neither is required.
/// Returns the raw claims payload; nothing in it is read before this succeeds.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = config.leeway_seconds();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Audience is not part of this token contract.
        validation.validate_aud = false;
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> AccessResult<Value> {
        let data = jsonwebtoken::decode::<Value>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
