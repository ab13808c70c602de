//! Transport-level layers shared by every route.
//!
//! Outermost first: error mapping, request id, body limit, timeout, access log.
//! The request deadline lives here, outside the security chain: token checks
//! themselves have no timeout of their own.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::header::HeaderName;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn apply(router: Router) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            map_transport_error(err)
        }))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        // copied onto 401/403 answered by the security layers too
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

fn map_transport_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!(timeout = ?REQUEST_TIMEOUT, "request deadline exceeded");
        AppError::RequestTimeout
    } else {
        tracing::error!(error = %err, "unhandled transport error");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_deadline_maps_to_timeout() {
        let err: BoxError = Box::new(Elapsed::new());
        assert!(matches!(map_transport_error(err), AppError::RequestTimeout));
    }

    #[test]
    fn other_failures_map_to_internal() {
        let err: BoxError = "connection reset".into();
        assert!(matches!(map_transport_error(err), AppError::Internal));
    }
}
