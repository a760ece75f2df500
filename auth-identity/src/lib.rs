//! Credential verification and registration for PetClinic Engine
//!
//! This module provides the authenticator in front of the credential store:
//! - Registration with Argon2id password hashing and the paired Owner
//!   profile written as one atomic unit
//! - Login with unified `InvalidCredentials` for unknown accounts and
//!   wrong passwords (no account-enumeration side channel)
//! - Token issuance on successful verification
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_identity::{IdentityService, RegisterRequest};
//!
//! let user = service.register(RegisterRequest { /* ... */ }).await?;
//! let login = service.login("owner@petclinic.dev", "pw").await?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use config::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
