/*
 * Responsibility
 * - Router-level layers, applied in app::build_router
 * - auth: filter chain + access policy; the rest is transport plumbing
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
