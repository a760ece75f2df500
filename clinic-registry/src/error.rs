use crate::models::VisitStatus;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: Uuid },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("visit status cannot move from {from} to {to}")]
    InvalidTransition { from: VisitStatus, to: VisitStatus },

    #[error("storage unavailable")]
    Unavailable,
}

impl RegistryError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource, id }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
