use axum::{Router, routing::get};

use crate::api::handlers::{
    actuator::{info, routes as policy_routes},
    principal::principal,
};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actuator/info", get(info))
        .route("/actuator/routes", get(policy_routes))
        .route("/principal", get(principal))
        .fallback(|| async { AppError::NotFound })
}
