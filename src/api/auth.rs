//! Session extraction from the `Authorization: Bearer <token>` header.
//!
//! Handlers take a [`SessionContext`] argument to require a principal:
//!
//! ```rust,ignore
//! async fn me(ctx: SessionContext) -> Json<SessionContext> {
//!     Json(ctx)
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::SessionContext;
use crate::error::GatewayError;

const BEARER_PREFIX: &str = "Bearer ";

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| GatewayError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                GatewayError::Unauthorized("Expected 'Bearer <token>'".to_string())
            })?;

        let ctx = Self::from_token(token)?;
        tracing::trace!(user = %ctx.user_id, role = ?ctx.role, "session resolved");
        Ok(ctx)
    }
}
