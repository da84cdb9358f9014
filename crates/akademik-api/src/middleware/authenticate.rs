//! Bearer token authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use akademik_auth::guard::RequestIdentity;
use akademik_auth::guard::request::bearer_from_headers;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the bearer token to a user and stores the result as a
/// [`RequestIdentity`] extension.
///
/// Never rejects on its own: a missing or invalid token leaves the slot
/// empty and the session guard answers `Unauthenticated`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_from_headers(request.headers());
    let user = state.session_manager.resolve_identity(token).await?;

    request.extensions_mut().insert(RequestIdentity::new(user));
    Ok(next.run(request).await)
}
