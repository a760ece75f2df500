use clinic_registry::RegistryError;
use thiserror::Error;

/// Failures of ownership resolution, distinct from a deny
///
/// `NotFound` lets privileged callers surface a genuine 404; the engine
/// itself converts it into a deny for everyone else.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("storage unavailable")]
    Unavailable,
}

impl From<RegistryError> for AccessError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound { resource, .. } => AccessError::NotFound { resource },
            // Repository reads fail no other way.
            _ => AccessError::Unavailable,
        }
    }
}

pub type Result<T> = std::result::Result<T, AccessError>;
