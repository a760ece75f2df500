use auth_token::TokenError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    /// Unknown account and wrong password both surface as this variant;
    /// distinguishing them would leak account existence.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("password hashing failed")]
    Hashing,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("storage unavailable")]
    StorageUnavailable,
}

pub type Result<T> = std::result::Result<T, IdentityError>;
