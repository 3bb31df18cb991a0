//! Request-level policies driven by `AppConfig`: Host header checking,
//! HTTPS redirect and HSTS.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Reject requests whose `Host` header is not in the allowed list. Skipped
/// entirely in debug mode or when the list is empty / contains `*`.
pub async fn check_host(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let config = &state.config;
    if config.debug || config.accepts_any_host() {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let hostname = strip_port(host);

    if !host_allowed(hostname, &config.allowed_hosts) {
        return AppError::DisallowedHost(hostname.to_string()).into_response();
    }

    next.run(req).await
}

/// Redirect plain-HTTP traffic when SSL redirect is on, and stamp the HSTS
/// header on responses when an HSTS max-age is configured.
pub async fn secure_transport(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let security = &state.config.security;

    if security.ssl_redirect && !is_https(&req) {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let location = format!("https://{host}{}", req.uri());
        return (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, location)],
        )
            .into_response();
    }

    let hsts_seconds = security.hsts_seconds;
    let mut res = next.run(req).await;
    if hsts_seconds > 0
        && let Ok(value) = HeaderValue::from_str(&format!("max-age={hsts_seconds}"))
    {
        res.headers_mut()
            .insert(header::STRICT_TRANSPORT_SECURITY, value);
    }
    res
}

/// The service sits behind a proxy in production; scheme comes from
/// `X-Forwarded-Proto`.
fn is_https(req: &Request) -> bool {
    req.headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|p| p.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// Bracketed IPv6 literals keep their brackets; only the trailing `:port`
/// is dropped.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }
    host.rsplit_once(':')
        .map(|(name, _)| name)
        .unwrap_or(host)
}

/// Exact match, or suffix match for patterns with a leading dot
/// (".example.com" allows any subdomain and the bare domain).
fn host_allowed(hostname: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|pattern| {
        if let Some(domain) = pattern.strip_prefix('.') {
            hostname == domain || hostname.ends_with(pattern.as_str())
        } else {
            hostname.eq_ignore_ascii_case(pattern)
        }
    })
}
