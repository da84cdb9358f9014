//! Admin handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/users/{id}/force-logout
pub async fn force_logout_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .session_manager
        .admin_force_logout(auth.user(), user_id)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
