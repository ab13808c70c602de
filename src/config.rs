use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::security::TokenConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    /// Bearer token presented by callers.
    pub access: TokenConfig,
    /// Token stamped by the gateway; `None` disables the gateway check.
    pub gateway: Option<TokenConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let access_secret = lookup("ACCESS_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("ACCESS_SECRET"))?;

        let access_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let access = TokenConfig::new(
            header_name(lookup("ACCESS_HEADER"), "authorization", "ACCESS_HEADER")?,
            lookup("ACCESS_PREFIX").unwrap_or_else(|| "Bearer ".to_string()),
            access_secret,
        )
        .with_leeway(access_leeway_seconds);

        let gateway = match lookup("GATEWAY_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => Some(TokenConfig::new(
                header_name(
                    lookup("GATEWAY_HEADER"),
                    "x-gateway-authorization",
                    "GATEWAY_HEADER",
                )?,
                lookup("GATEWAY_PREFIX").unwrap_or_else(|| "Bearer ".to_string()),
                secret,
            )),
            None => None,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            access,
            gateway,
        })
    }
}

fn header_name(
    value: Option<String>,
    default: &'static str,
    key: &'static str,
) -> Result<HeaderName, ConfigError> {
    match value {
        Some(name) => HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|_| ConfigError::Invalid(key)),
        None => Ok(HeaderName::from_static(default)),
    }
}
