//! Clinic domain registry for PetClinic Engine
//!
//! Entities and storage interfaces for the ownership chain
//! User - Owner - Pet - Visit, plus the independent Vet directory:
//! - Repository traits consumed by the authorization resolver and services
//! - An in-memory reference store whose multi-row writes (the registration
//!   pair, the account cascade) are atomic
//! - The cascading account eraser: one unit of work removing a user and
//!   everything it transitively owns
//!
//! # Invariants
//!
//! - An Owner has exactly one linked user; a user has at most one Owner
//! - A Pet always has an Owner; deleting an Owner deletes its Pets
//! - A Visit always references an existing Pet and Vet; deleting a Pet
//!   deletes its Visits
//! - Visit status only moves Upcoming → Completed | Cancelled

pub mod eraser;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use eraser::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use store::*;
