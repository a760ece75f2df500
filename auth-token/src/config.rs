use serde::{Deserialize, Serialize};

/// Token issuance configuration
///
/// The secret is loaded once at process start and never mutated afterwards;
/// every codec built from the same config verifies the same tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Server-held HMAC signing secret
    pub secret: String,
    /// Token lifetime in hours
    pub ttl_hours: i64,
    /// Issuer claim stamped into every token
    pub issuer: String,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: 24,
            issuer: "petclinic-engine".to_string(),
        }
    }

    pub fn with_ttl_hours(mut self, ttl_hours: i64) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }
}
