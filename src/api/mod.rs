/*
 * Responsibility
 * - HTTP surface that sits behind the security layers
 * - routes() re-export
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
