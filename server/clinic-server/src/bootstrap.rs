//! Startup seeding of the administrative accounts
//!
//! Idempotent: an account whose email already exists is left untouched,
//! so restarting the server never resets a changed password.

use auth_identity::{IdentityError, IdentityService};
use auth_token::Role;
use std::env;
use tracing::info;

const SUPERADMIN_EMAIL: &str = "superadmin@petclinic.com";
const ADMIN_EMAIL: &str = "admin@petclinic.com";

/// Seed the SuperAdmin and Admin accounts
///
/// Passwords come from `PETCLINIC_SUPERADMIN_PASSWORD` /
/// `PETCLINIC_ADMIN_PASSWORD`, with development fallbacks.
pub async fn seed(identity: &IdentityService) -> Result<(), IdentityError> {
    let superadmin_password =
        env::var("PETCLINIC_SUPERADMIN_PASSWORD").unwrap_or_else(|_| "superadmin123".to_string());
    let admin_password =
        env::var("PETCLINIC_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    identity
        .ensure_account(
            SUPERADMIN_EMAIL,
            "Super Admin",
            &superadmin_password,
            [Role::SuperAdmin].into_iter().collect(),
        )
        .await?;

    identity
        .ensure_account(
            ADMIN_EMAIL,
            "Admin",
            &admin_password,
            [Role::Admin].into_iter().collect(),
        )
        .await?;

    info!("administrative accounts seeded");
    Ok(())
}
