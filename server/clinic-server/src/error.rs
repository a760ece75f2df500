use auth_access::AccessError;
use auth_identity::IdentityError;
use auth_token::TokenError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clinic_registry::RegistryError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Error payload returned to API clients
///
/// Carries a correlation id and a stable error type; internal detail never
/// leaves the process.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error_id: String,
    pub error_type: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Boundary error, one variant per outcome the API can surface
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{message}")]
    InvalidToken { message: &'static str },

    /// Deliberately generic: which rule denied the request is not revealed
    #[error("access denied")]
    Denied,

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("storage unavailable, retry later")]
    StorageUnavailable,

    #[error("internal error")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn missing_token() -> Self {
        Self::InvalidToken {
            message: "missing bearer token",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Denied => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_failed",
            ApiError::DuplicateEmail => "duplicate_email",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::InvalidToken { .. } => "invalid_token",
            ApiError::Denied => "access_denied",
            ApiError::NotFound { .. } => "not_found",
            ApiError::StorageUnavailable => "storage_unavailable",
            ApiError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status = self.status_code();

        // Internal detail goes to the log, keyed by the correlation id;
        // the response body carries only the public message.
        match &self {
            ApiError::Internal { message } => {
                error!(error_id = %error_id, detail = %message, "internal error");
            }
            other => {
                warn!(
                    error_id = %error_id,
                    error_type = %other.error_type(),
                    status = %status.as_u16(),
                    "request failed"
                );
            }
        }

        let body = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => ApiError::InvalidToken {
                message: "token has expired",
            },
            TokenError::InvalidSignature | TokenError::Malformed => ApiError::InvalidToken {
                message: "invalid token",
            },
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidCredentials => ApiError::InvalidCredentials,
            IdentityError::DuplicateEmail => ApiError::DuplicateEmail,
            IdentityError::Validation(message) => ApiError::Validation { message },
            IdentityError::StorageUnavailable => ApiError::StorageUnavailable,
            IdentityError::Hashing | IdentityError::Token(_) => ApiError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound { resource, .. } => ApiError::NotFound {
                resource: resource.to_string(),
            },
            RegistryError::Conflict(message) => ApiError::Validation { message },
            RegistryError::InvalidTransition { .. } => ApiError::Validation {
                message: e.to_string(),
            },
            RegistryError::Unavailable => ApiError::StorageUnavailable,
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound { resource } => ApiError::NotFound {
                resource: resource.to_string(),
            },
            AccessError::Unavailable => ApiError::StorageUnavailable,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
