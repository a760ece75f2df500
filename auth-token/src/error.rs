use thiserror::Error;

/// Token decode failures
///
/// `Expired` is reported for any token past its expiry, whether or not the
/// signature would verify; `InvalidSignature` only for structurally sound,
/// unexpired tokens whose HMAC does not match.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

pub type Result<T> = std::result::Result<T, TokenError>;
