use crate::error::{AccessError, Result};
use crate::models::ResourceKind;
use clinic_registry::{OwnerRepository, PetRepository, VisitRepository};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Walks the ownership chain User - Owner - Pet - Visit
///
/// Answers "does this subject own that resource, directly or
/// transitively". Fails closed: a missing link anywhere on the chain is
/// `NotFound`, which callers must treat as "not owned".
pub struct OwnershipResolver {
    owners: Arc<dyn OwnerRepository>,
    pets: Arc<dyn PetRepository>,
    visits: Arc<dyn VisitRepository>,
}

impl OwnershipResolver {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
        visits: Arc<dyn VisitRepository>,
    ) -> Self {
        Self {
            owners,
            pets,
            visits,
        }
    }

    pub async fn owns_transitively(
        &self,
        subject_id: Uuid,
        resource: ResourceKind,
        resource_id: Uuid,
    ) -> Result<bool> {
        let owns = match resource {
            ResourceKind::Owner => self.owns_owner(subject_id, resource_id).await?,
            ResourceKind::Pet => self.owns_pet(subject_id, resource_id).await?,
            ResourceKind::Visit => self.owns_visit(subject_id, resource_id).await?,
            // No ownership chain exists for these kinds.
            ResourceKind::Vet | ResourceKind::Account => false,
        };
        debug!(subject = %subject_id, %resource, id = %resource_id, owns, "resolved ownership");
        Ok(owns)
    }

    async fn owns_owner(&self, subject_id: Uuid, owner_id: Uuid) -> Result<bool> {
        let owner = self
            .owners
            .find_by_id(owner_id)
            .await?
            .ok_or(AccessError::NotFound { resource: "owner" })?;
        Ok(owner.user_id == subject_id)
    }

    async fn owns_pet(&self, subject_id: Uuid, pet_id: Uuid) -> Result<bool> {
        let pet = self
            .pets
            .find_by_id(pet_id)
            .await?
            .ok_or(AccessError::NotFound { resource: "pet" })?;
        self.owns_owner(subject_id, pet.owner_id).await
    }

    async fn owns_visit(&self, subject_id: Uuid, visit_id: Uuid) -> Result<bool> {
        let visit = self
            .visits
            .find_by_id(visit_id)
            .await?
            .ok_or(AccessError::NotFound { resource: "visit" })?;
        self.owns_pet(subject_id, visit.pet_id).await
    }
}
