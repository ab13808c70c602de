//! Bearer-token authentication layer for a service running behind an API gateway.
//!
//! Every request passes an ordered [`security::FilterChain`] that builds its
//! [`security::SecurityContext`], then the [`security::AccessPolicy`] route
//! table, before reaching a handler.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod security;
pub mod state;
