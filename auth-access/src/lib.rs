//! Role and ownership authorization for PetClinic Engine
//!
//! One decision function for every resource access in the system:
//! - Role rules with an explicit set of actions reserved to SuperAdmin
//! - Transitive ownership resolution along User - Owner - Pet - Visit
//! - Fail-closed: a missing resource is "not owned", never a bypass
//!
//! Scattering per-endpoint ownership checks is exactly the defect this
//! module exists to remove; callers pass the verified identity in and get
//! a [`Decision`] back, nothing else.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_access::{AccessEngine, Action, ResourceKind};
//!
//! let decision = engine
//!     .authorize(&identity, Action::Read, ResourceKind::Pet, Some(pet_id))
//!     .await?;
//! if !decision.is_allowed() {
//!     return Err(forbidden());
//! }
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod resolver;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use resolver::*;
