//! Authentication context extraction
//!
//! Every protected handler takes an [`AuthContext`] parameter; extraction
//! decodes the bearer token and fails the request with 401 before the
//! handler body runs. The verified identity is then passed explicitly into
//! the services - nothing is stored in task-local or global state.

use crate::error::ApiError;
use crate::server::ClinicServer;
use async_trait::async_trait;
use auth_token::AuthIdentity;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// Verified caller identity, extracted from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthContext(pub AuthIdentity);

#[async_trait]
impl FromRequestParts<ClinicServer> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ClinicServer,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::missing_token)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::missing_token)?;

        let identity = state.codec.decode(token)?;
        Ok(AuthContext(identity))
    }
}
