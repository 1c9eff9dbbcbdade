use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

/// Wide-open CORS policy. Only suitable for local testing.
pub fn cors_allow_all() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Reject requests whose Host header is not in `allowed_hosts`.
pub async fn validate_host(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let settings = &state.settings;
    if settings.allows_any_host() {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host())
        .map(str::to_string);

    match host {
        Some(host) if settings.allowed_hosts.iter().any(|p| host_matches(&host, p)) => {
            next.run(request).await
        }
        other => {
            tracing::warn!(host = ?other, "Invalid Host header");
            (StatusCode::BAD_REQUEST, "Bad Request (400)").into_response()
        }
    }
}

/// Match a Host header value against one allow-list entry.
pub fn host_matches(host: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let host = strip_port(host).trim_end_matches('.').to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    match pattern.strip_prefix('.') {
        Some(domain) => host == domain || host.ends_with(&pattern),
        None => host == pattern,
    }
}

fn strip_port(host: &str) -> &str {
    // IPv6 literal: keep the brackets, drop anything after them.
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
