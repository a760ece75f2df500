//! Stateless identity tokens for PetClinic Engine
//!
//! This module implements the signed, expiring token that every
//! authenticated request carries:
//! - HMAC-SHA256 signed JWTs covering subject, roles, issue and expiry time
//! - Decoding back into a verified [`AuthIdentity`]
//! - No server-side session state; validity is a pure function of
//!   signature integrity and expiry
//!
//! # Example
//!
//! ```rust
//! use auth_token::{Role, TokenCodec, TokenConfig};
//! use std::collections::HashSet;
//! use uuid::Uuid;
//!
//! let codec = TokenCodec::new(TokenConfig::new("server-held-secret"));
//!
//! let roles: HashSet<Role> = [Role::User].into_iter().collect();
//! let issued = codec.issue(Uuid::new_v4(), "owner@petclinic.dev", &roles)?;
//!
//! let identity = codec.decode(&issued.token)?;
//! assert!(identity.has_role(Role::User));
//! # Ok::<(), auth_token::TokenError>(())
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod identity;

pub use claims::*;
pub use codec::*;
pub use config::*;
pub use error::*;
pub use identity::*;
