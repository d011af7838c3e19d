//! Access Log Middleware
//!
//! Writes one line per request under the `fhir.access` tracing target with the
//! path, operation, user agent and request parameters.

use std::time::Instant;

use axum::{
    extract::Request,
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Tracing target for access log lines
pub const ACCESS_LOG_TARGET: &str = "fhir.access";

/// Logs the request once the response is ready.
pub async fn access_log(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let params = request.uri().query().unwrap_or_default().to_string();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    info!(
        target: ACCESS_LOG_TARGET,
        "Path[{}] Operation[{}] UA[{}] Params[{}] Status[{}] Latency[{}ms]",
        path,
        method,
        user_agent,
        params,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    response
}
