use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Privilege tier of an account
///
/// Tiers have strict capability containment: `SuperAdmin` can do everything
/// `Admin` can, `Admin` everything `User` can, for the operations they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
            Role::SuperAdmin => write!(f, "SUPERADMIN"),
        }
    }
}

/// Verified subject of a request, decoded from a token
///
/// Passed explicitly through every call that needs the caller's identity.
/// There is no ambient "current user" context anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub subject_id: Uuid,
    pub email: String,
    pub roles: HashSet<Role>,
}

impl AuthIdentity {
    pub fn new(subject_id: Uuid, email: impl Into<String>, roles: HashSet<Role>) -> Self {
        Self {
            subject_id,
            email: email.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Admin-or-better check used by the privileged branches of the engine
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin) || self.roles.contains(&Role::SuperAdmin)
    }

    pub fn is_superadmin(&self) -> bool {
        self.roles.contains(&Role::SuperAdmin)
    }
}
