/*
 * Responsibility
 * - GET /actuator/info, GET /actuator/routes
 * - Public (see AccessPolicy::standard); polled by load balancer health checks
 */
use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn info() -> Json<Value> {
    Json(json!({
        "app": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

#[derive(Debug, Serialize)]
pub struct RouteRuleView {
    pub method: String,
    pub pattern: String,
    pub requirement: String,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub rules: Vec<RouteRuleView>,
    pub default: String,
}

/// The access policy table as currently enforced.
pub async fn routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let rules = state
        .policy
        .rules()
        .iter()
        .map(|rule| RouteRuleView {
            method: rule
                .method
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "ANY".to_string()),
            pattern: rule.pattern.to_string(),
            requirement: rule.requirement.to_string(),
        })
        .collect();

    Json(RoutesResponse {
        rules,
        default: state.policy.default_requirement().to_string(),
    })
}
