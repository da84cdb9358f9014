//! Guard outcomes and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Result of running the guard over one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Hand the request to downstream handling unchanged.
    Allow,
    /// Stop here and answer with the rejection.
    Reject(GuardRejection),
}

impl GuardOutcome {
    /// Whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Why the guard refused a request. All variants are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardRejection {
    /// No identity was resolved for the request.
    Unauthenticated,
    /// The account has no live session (logged out or force-logged-out).
    SessionExpired,
    /// The presented token is not the one on record; a newer login exists.
    DeviceConflict,
}

impl GuardRejection {
    /// Machine-readable code sent to the client, if any.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated => None,
            Self::SessionExpired => Some("SESSION_EXPIRED"),
            Self::DeviceConflict => Some("DEVICE_CONFLICT"),
        }
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthenticated.",
            Self::SessionExpired => "Your session has ended. Please log in again.",
            Self::DeviceConflict => {
                "This account is in use on another device. You have been logged out."
            }
        }
    }

    /// HTTP status for the rejection.
    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// JSON body for the rejection.
    pub fn body(&self) -> RejectionBody {
        RejectionBody {
            message: self.message().to_string(),
            code: self.code().map(String::from),
        }
    }
}

/// Wire shape: `{ "message": ..., "code"?: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionBody {
    /// Human-readable message.
    pub message: String,
    /// `SESSION_EXPIRED` or `DEVICE_CONFLICT`; absent for plain 401s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
