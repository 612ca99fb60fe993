//! Request-scoped identity supplied by the external identity provider.
//!
//! The provider issues bearer tokens whose payload is base64-encoded JSON
//! describing the principal. The role is trusted as supplied.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Role attached to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organizer with event management rights.
    Admin,
    /// Regular signed-in user.
    User,
}

/// Claims carried inside a bearer token.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    email: String,
    role: Role,
}

/// The authenticated principal, passed explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// Principal identifier; falls back to the email when absent.
    pub user_id: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Role as supplied by the provider.
    pub role: Role,
}

impl SessionContext {
    /// Builds a context directly, e.g. for background jobs and tests.
    #[must_use]
    pub fn new(user_id: &str, email: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            full_name: "User".to_string(),
            email: email.to_string(),
            role,
        }
    }

    /// Decodes a provider token (base64 of the JSON claims).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] if the token is not valid
    /// base64 or does not contain the expected claims.
    pub fn from_token(token: &str) -> Result<Self, GatewayError> {
        let raw = STANDARD
            .decode(token.trim())
            .map_err(|_| GatewayError::Unauthorized("Invalid token".to_string()))?;
        let claims: TokenClaims = serde_json::from_slice(&raw)
            .map_err(|_| GatewayError::Unauthorized("Invalid token".to_string()))?;

        let email = claims.email.trim().to_string();
        if email.is_empty() {
            return Err(GatewayError::Unauthorized("Invalid token".to_string()));
        }
        let user_id = claims
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| email.clone());
        let full_name = claims
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "User".to_string());

        Ok(Self {
            user_id,
            full_name,
            email,
            role: claims.role,
        })
    }

    /// Encodes this context as a provider-style token.
    #[must_use]
    pub fn to_token(&self) -> String {
        let claims = serde_json::json!({
            "id": self.user_id,
            "name": self.full_name,
            "email": self.email,
            "role": self.role,
        });
        STANDARD.encode(claims.to_string())
    }

    /// Returns `true` for admin principals.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails unless the principal is an admin.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] for non-admin principals.
    pub fn require_admin(&self) -> Result<(), GatewayError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(GatewayError::Forbidden("admin role required".to_string()))
        }
    }
}
