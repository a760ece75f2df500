use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller wants to do with a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Kind of resource an authorization decision is about
///
/// `Account` is the user record itself; deleting one cascades through its
/// whole ownership chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Account,
    Owner,
    Pet,
    Visit,
    Vet,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Account,
        ResourceKind::Owner,
        ResourceKind::Pet,
        ResourceKind::Visit,
        ResourceKind::Vet,
    ];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Account => write!(f, "account"),
            ResourceKind::Owner => write!(f, "owner"),
            ResourceKind::Pet => write!(f, "pet"),
            ResourceKind::Visit => write!(f, "visit"),
            ResourceKind::Vet => write!(f, "vet"),
        }
    }
}

/// Why a request was denied; logged, never surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    InsufficientRole,
    NotOwner,
    ReservedAction,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::InsufficientRole => write!(f, "insufficient role"),
            DenyReason::NotOwner => write!(f, "not owner"),
            DenyReason::ReservedAction => write!(f, "action reserved to superadmin"),
        }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}
