use crate::error::{RegistryError, Result};
use crate::repository::{OwnerRepository, PetRepository, VisitRepository};
use async_trait::async_trait;
use auth_identity::{CredentialRepository, IdentityError};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Unit of work removing a user and everything it transitively owns
///
/// Applied atomically by the storage layer: visits, then pets, then the
/// owner, then the user's role associations, then the user itself. All
/// five steps commit or none do.
#[derive(Debug, Clone)]
pub struct AccountCascade {
    pub user_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub pet_ids: Vec<Uuid>,
    pub visit_ids: Vec<Uuid>,
}

/// Outcome of a committed cascade, for logging and the boundary response
#[derive(Debug, Clone, serde::Serialize)]
pub struct CascadeReport {
    pub user_id: Uuid,
    pub owner_deleted: bool,
    pub pets_deleted: usize,
    pub visits_deleted: usize,
}

/// Atomic application of an [`AccountCascade`]
///
/// Implementations must leave prior committed state untouched on failure;
/// a partial cascade must never be observable.
#[async_trait]
pub trait CascadeStore: Send + Sync {
    async fn apply_cascade(&self, cascade: &AccountCascade) -> Result<()>;
}

/// Resolves the cascade scope and demarcates the transaction
///
/// The eraser itself takes no locks: it reads the scope, then hands one
/// unit of work to the store. Concurrent cascades on different accounts
/// are independent; same-account races are serialized by the store.
pub struct AccountEraser {
    users: Arc<dyn CredentialRepository>,
    owners: Arc<dyn OwnerRepository>,
    pets: Arc<dyn PetRepository>,
    visits: Arc<dyn VisitRepository>,
    store: Arc<dyn CascadeStore>,
}

impl AccountEraser {
    pub fn new(
        users: Arc<dyn CredentialRepository>,
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
        visits: Arc<dyn VisitRepository>,
        store: Arc<dyn CascadeStore>,
    ) -> Self {
        Self {
            users,
            owners,
            pets,
            visits,
            store,
        }
    }

    /// Remove the account and its owner/pets/visits as one transaction
    ///
    /// An already-deleted account fails with `NotFound` and mutates
    /// nothing, so repeated calls are safe. Accounts without an owner
    /// profile (administrative accounts) delete with an empty scope.
    pub async fn delete_account_cascade(&self, user_id: Uuid) -> Result<CascadeReport> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(storage_fault)?
            .ok_or(RegistryError::NotFound {
                resource: "user",
                id: user_id,
            })?;

        let owner = self.owners.find_by_user_id(user_id).await?;

        let mut pet_ids = Vec::new();
        let mut visit_ids = Vec::new();
        if let Some(ref owner) = owner {
            for pet in self.pets.find_by_owner_id(owner.id).await? {
                for visit in self.visits.find_by_pet_id(pet.id).await? {
                    visit_ids.push(visit.id);
                }
                pet_ids.push(pet.id);
            }
        }

        let cascade = AccountCascade {
            user_id,
            owner_id: owner.map(|o| o.id),
            pet_ids,
            visit_ids,
        };

        if let Err(e) = self.store.apply_cascade(&cascade).await {
            warn!(user_id = %user_id, error = %e, "account cascade rolled back");
            return Err(e);
        }

        let report = CascadeReport {
            user_id,
            owner_deleted: cascade.owner_id.is_some(),
            pets_deleted: cascade.pet_ids.len(),
            visits_deleted: cascade.visit_ids.len(),
        };
        info!(
            user_id = %user_id,
            pets = report.pets_deleted,
            visits = report.visits_deleted,
            "account cascade committed"
        );
        Ok(report)
    }
}

fn storage_fault(e: IdentityError) -> RegistryError {
    match e {
        IdentityError::StorageUnavailable => RegistryError::Unavailable,
        // Credential lookups cannot fail any other way here.
        _ => RegistryError::Unavailable,
    }
}
