use crate::error::TokenError;
use crate::identity::{AuthIdentity, Role};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every issued token
///
/// The signature covers all of these fields; nothing else about the caller
/// is trusted at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Role set granted at issue time
    pub roles: Vec<Role>,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(
        subject_id: Uuid,
        email: &str,
        roles: &std::collections::HashSet<Role>,
        issuer: &str,
        ttl_hours: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        let mut roles: Vec<Role> = roles.iter().copied().collect();
        roles.sort();
        Self {
            sub: subject_id.to_string(),
            email: email.to_string(),
            roles,
            iat: now,
            exp: now + ttl_hours * 3600,
            iss: issuer.to_string(),
        }
    }

    /// Expiry test against the current clock, zero leeway
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }

    /// Convert verified claims into the identity handed to the engine
    pub fn identity(&self) -> Result<AuthIdentity, TokenError> {
        Ok(AuthIdentity {
            subject_id: self.subject_id()?,
            email: self.email.clone(),
            roles: self.roles.iter().copied().collect(),
        })
    }
}
