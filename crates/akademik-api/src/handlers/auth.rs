//! Auth handlers: login, logout, me and the force-logout endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use akademik_auth::guard::request::bearer_from_headers;
use akademik_core::error::AppError;

use crate::dto::request::{ForceLogoutByTokenRequest, ForceLogoutRequest, LoginRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()?;

    let result = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: UserResponse::from(&result.user),
    })))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.logout(auth.id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// GET /api/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(auth.user())))
}

/// POST /api/force-logout
pub async fn force_logout(
    State(state): State<AppState>,
    Json(req): Json<ForceLogoutRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()?;

    state
        .session_manager
        .force_logout(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "All sessions for this account have been ended",
    ))))
}

/// POST /api/force-logout-by-token
pub async fn force_logout_by_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<ForceLogoutByTokenRequest>>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let from_body = body.and_then(|Json(req)| req.token).filter(|t| !t.is_empty());
    let token = match from_body.as_deref() {
        Some(token) => token,
        None => bearer_from_headers(&headers)
            .ok_or_else(|| AppError::validation("A token is required"))?,
    };

    state.session_manager.force_logout_by_token(token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "All sessions for this account have been ended",
    ))))
}
