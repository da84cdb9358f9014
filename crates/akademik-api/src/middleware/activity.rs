//! Activity tracking middleware.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info_span};

use akademik_auth::guard::{AuthenticationResolver, RequestIdentity};

/// Runs the rest of the request inside a span tagged with the caller's
/// user id, IP address and user agent.
pub async fn track_activity(request: Request, next: Next) -> Response {
    let Some(user_id) = request
        .extensions()
        .get::<RequestIdentity>()
        .and_then(|identity| identity.current_identity())
        .map(|user| user.id)
    else {
        return next.run(request).await;
    };

    let ip = client_ip(&request);
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span = info_span!(
        "activity",
        user_id = %user_id,
        ip = %ip,
        user_agent = %user_agent
    );
    next.run(request).instrument(span).await
}

fn client_ip(request: &Request) -> String {
    forwarded_for(request.headers())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// First hop of `X-Forwarded-For`.
fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
}
