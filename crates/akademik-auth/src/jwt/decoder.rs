//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use akademik_core::config::AuthConfig;
use akademik_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature + expiry validation.
    validation: Validation,
    /// Signature-only validation, used by force-logout-by-token.
    signature_only: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        let mut signature_only = Validation::new(Algorithm::HS256);
        signature_only.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            signature_only,
        }
    }

    /// Decodes a token, checking signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_with(token, &self.validation)
    }

    /// Decodes a token, checking the signature but not the expiry.
    ///
    /// Lets an expired token still identify whose session to clear.
    pub fn decode_allow_expired(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_with(token, &self.signature_only)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }
}
