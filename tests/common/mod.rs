#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use resource_access::app;
use resource_access::config::Config;
use serde_json::{Value, json};

pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const GATEWAY_SECRET: &str = "integration-gateway-secret";
pub const GATEWAY_HEADER: &str = "x-gateway-authorization";

pub fn config(pairs: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = HashMap::new();
    env.insert("ACCESS_SECRET".into(), ACCESS_SECRET.into());
    for (k, v) in pairs {
        env.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| env.get(key).cloned()).expect("test config")
}

/// Full router as served, without a gateway check.
pub fn app() -> Router {
    app_with(&config(&[]))
}

pub fn app_with(config: &Config) -> Router {
    let state = app::build_state(config).expect("state");
    app::build_router(state, config)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn sign(claims: &Value, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign token")
}

/// Token as the identity service would issue it.
pub fn access_token(sub: &str, authorities: &[&str]) -> String {
    sign(
        &json!({
            "sub": sub,
            "authorities": authorities,
            "iat": now(),
            "exp": now() + 600,
        }),
        ACCESS_SECRET,
    )
}

pub fn gateway_token() -> String {
    sign(&json!({"sub": "gateway", "exp": now() + 600}), GATEWAY_SECRET)
}

pub fn get(path: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
