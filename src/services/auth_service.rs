use crate::api::error::AppError;
use crate::services::credentials::CredentialVerifier;
use crate::services::revocation::RevocationStore;
use crate::utils::auth::{ADMIN_ROLE, Claims, JwtKeys};
use std::sync::Arc;
use tracing::{info, warn};

/// Why the gate refused a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Token was logged out; reported with a plain-text body
    Revoked,
    /// Missing, malformed, wrongly signed or expired
    Invalid,
}

/// Issues, validates and revokes bearer tokens
pub struct AuthService {
    credentials: Arc<dyn CredentialVerifier>,
    revocations: Arc<dyn RevocationStore>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialVerifier>,
        revocations: Arc<dyn RevocationStore>,
        keys: JwtKeys,
    ) -> Self {
        Self {
            credentials,
            revocations,
            keys,
        }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    /// Returns `None` when the credentials are rejected
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>, AppError> {
        if !self.credentials.verify(username, password).await? {
            warn!("Failed login attempt for user: {}", username);
            return Ok(None);
        }

        let (token, _claims) = self
            .keys
            .create_jwt(username, ADMIN_ROLE)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        info!("User {} logged in successfully", username);
        Ok(Some(token))
    }

    /// Blacklist `token` for the rest of its lifetime
    pub async fn logout(&self, token: &str, claims: &Claims) {
        self.revocations.revoke(token, claims.expires_at()).await;
        info!("User {} logged out (token {})", claims.sub, claims.jti);
    }

    /// Gate check run before every protected handler
    pub async fn authenticate(&self, token: &str) -> Result<Claims, GateRejection> {
        if self.revocations.is_revoked(token).await {
            warn!("Rejected logged-out token");
            return Err(GateRejection::Revoked);
        }

        self.keys.validate_jwt(token).map_err(|e| {
            tracing::debug!("Authentication failed: {}", e);
            GateRejection::Invalid
        })
    }
}
