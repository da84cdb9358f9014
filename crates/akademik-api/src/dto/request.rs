//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username (NIM, NIP or admin handle).
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Credential-based force logout body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForceLogoutRequest {
    /// Username of the account to log out.
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    /// Password of the account.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token-based force logout body. The bearer header is used when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForceLogoutByTokenRequest {
    /// A token previously issued to the account.
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            username: "2201001".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = LoginRequest {
            username: String::new(),
            password: String::new(),
        };
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
