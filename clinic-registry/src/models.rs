use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Owner profile, linked 1:1 to a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub user_id: Uuid,
}

impl Owner {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        user_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            user_id,
        }
    }
}

/// Pet, always owned by exactly one Owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub owner_id: Uuid,
}

impl Pet {
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        birth_date: NaiveDate,
        owner_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            breed: breed.into(),
            birth_date,
            owner_id,
        }
    }
}

/// Vet directory entry; carries no ownership chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vet {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

impl Vet {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            specialization: specialization.into(),
        }
    }
}

/// Visit lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    #[serde(rename = "UPCOMING")]
    Upcoming,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl VisitStatus {
    /// Valid moves: Upcoming may complete or cancel; terminal states are
    /// frozen. Writing the current state back is a no-op, not a transition.
    pub fn can_transition_to(self, next: VisitStatus) -> bool {
        self == next || matches!(self, VisitStatus::Upcoming)
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitStatus::Upcoming => write!(f, "UPCOMING"),
            VisitStatus::Completed => write!(f, "COMPLETED"),
            VisitStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Visit, referencing an existing Pet and Vet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub visit_date: NaiveDate,
    pub description: String,
    pub pet_id: Uuid,
    pub vet_id: Uuid,
    pub status: VisitStatus,
}

impl Visit {
    pub fn new(
        visit_date: NaiveDate,
        description: impl Into<String>,
        pet_id: Uuid,
        vet_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            visit_date,
            description: description.into(),
            pet_id,
            vet_id,
            status: VisitStatus::Upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upcoming_may_complete_or_cancel() {
        assert!(VisitStatus::Upcoming.can_transition_to(VisitStatus::Completed));
        assert!(VisitStatus::Upcoming.can_transition_to(VisitStatus::Cancelled));
        assert!(VisitStatus::Upcoming.can_transition_to(VisitStatus::Upcoming));
    }

    #[test]
    fn terminal_states_are_frozen() {
        assert!(!VisitStatus::Completed.can_transition_to(VisitStatus::Upcoming));
        assert!(!VisitStatus::Completed.can_transition_to(VisitStatus::Cancelled));
        assert!(!VisitStatus::Cancelled.can_transition_to(VisitStatus::Upcoming));
        assert!(!VisitStatus::Cancelled.can_transition_to(VisitStatus::Completed));
        // Re-stating the current status is allowed.
        assert!(VisitStatus::Completed.can_transition_to(VisitStatus::Completed));
    }
}
