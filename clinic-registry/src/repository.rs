use crate::error::Result;
use crate::models::{Owner, Pet, Vet, Visit};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage interface for owner profiles
///
/// Absent rows are `Ok(None)`; only a storage fault is an `Err`. Faults
/// propagate to the caller and are never retried here.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Owner>>;

    /// Resolve the 1:1 link from a user account to its owner profile
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Owner>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>>;

    async fn list(&self) -> Result<Vec<Owner>>;

    /// Fails with `Conflict` when the user already has an owner profile
    async fn create(&self, owner: &Owner) -> Result<Owner>;

    async fn update(&self, owner: &Owner) -> Result<Owner>;
}

/// Storage interface for pets
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>>;

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Pet>>;

    async fn list(&self) -> Result<Vec<Pet>>;

    /// Fails with `NotFound` when the referenced owner does not exist
    async fn create(&self, pet: &Pet) -> Result<Pet>;

    async fn update(&self, pet: &Pet) -> Result<Pet>;

    /// Removes the pet and its dependent visits; a visit cannot outlive
    /// its pet
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Storage interface for the vet directory
#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vet>>;

    async fn list(&self) -> Result<Vec<Vet>>;

    async fn create(&self, vet: &Vet) -> Result<Vet>;

    async fn update(&self, vet: &Vet) -> Result<Vet>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Storage interface for visits
#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Visit>>;

    async fn find_by_pet_id(&self, pet_id: Uuid) -> Result<Vec<Visit>>;

    /// All visits of all pets of one owner
    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Visit>>;

    async fn list(&self) -> Result<Vec<Visit>>;

    /// Fails with `NotFound` when the referenced pet or vet does not exist
    async fn create(&self, visit: &Visit) -> Result<Visit>;

    /// Fails with `InvalidTransition` when the status change is not a
    /// valid lifecycle move
    async fn update(&self, visit: &Visit) -> Result<Visit>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}
