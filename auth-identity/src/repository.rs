use crate::error::Result;
use crate::models::{OwnerProfile, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage interface for credential records
///
/// Emails are stored and looked up in normalized form. Absent rows are
/// `Ok(None)`, not errors; only a storage fault is an `Err`.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Persist a user with no owner profile (administrative accounts)
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Persist a user and its paired owner profile as one atomic unit.
    /// If the owner write fails, the user write must not be observable.
    async fn create_user_with_owner(&self, user: &User, profile: &OwnerProfile) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Remove the role associations of a user (the many-to-many rows)
    async fn delete_role_associations(&self, user_id: Uuid) -> Result<()>;

    async fn delete_user(&self, user_id: Uuid) -> Result<()>;
}
