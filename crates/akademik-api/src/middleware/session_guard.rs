//! Single-active-session middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use akademik_auth::guard::{GuardOutcome, RequestIdentity, RequestInspector};

use crate::error::ApiError;
use crate::state::AppState;

/// Runs the session guard over the request.
///
/// Must sit inside [`authenticate`](super::authenticate::authenticate),
/// which supplies the identity.
pub async fn session_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut identity = parts
        .extensions
        .remove::<RequestIdentity>()
        .unwrap_or_default();

    match state.session_guard.authorize(&parts, &mut identity).await {
        Ok(GuardOutcome::Allow) => {
            parts.extensions.insert(identity);
            next.run(Request::from_parts(parts, body)).await
        }
        Ok(GuardOutcome::Reject(rejection)) => {
            debug!(
                path = %parts.path(),
                code = rejection.code().unwrap_or("UNAUTHENTICATED"),
                "Session guard rejected request"
            );
            rejection.into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
