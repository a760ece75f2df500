use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub password_min_length: usize,
    pub password_require_numbers: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            password_require_numbers: false,
        }
    }
}
