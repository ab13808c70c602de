/*
 * Responsibility
 * - GET /principal: who the security context says is calling
 */
use axum::Json;
use serde::Serialize;

use crate::api::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub principal: String,
    pub authorities: Vec<String>,
}

pub async fn principal(AuthCtx(auth): AuthCtx) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        principal: auth.principal().to_string(),
        authorities: auth
            .authorities()
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
    })
}
