use crate::error::{ApiError, ApiResult};
use auth_access::{AccessEngine, Action, ResourceKind};
use auth_token::AuthIdentity;
use chrono::NaiveDate;
use clinic_registry::{OwnerRepository, Pet, PetRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePetRequest {
    pub owner_id: Uuid,
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

pub struct PetService {
    pets: Arc<dyn PetRepository>,
    owners: Arc<dyn OwnerRepository>,
    access: Arc<AccessEngine>,
}

impl PetService {
    pub fn new(
        pets: Arc<dyn PetRepository>,
        owners: Arc<dyn OwnerRepository>,
        access: Arc<AccessEngine>,
    ) -> Self {
        Self {
            pets,
            owners,
            access,
        }
    }

    pub async fn list(&self, identity: &AuthIdentity) -> ApiResult<Vec<Pet>> {
        self.authorize(identity, Action::Read, None).await?;
        Ok(self.pets.list().await?)
    }

    /// The caller's own pets, resolved through their owner profile
    pub async fn list_mine(&self, identity: &AuthIdentity) -> ApiResult<Vec<Pet>> {
        let owner = self
            .owners
            .find_by_user_id(identity.subject_id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))?;
        Ok(self.pets.find_by_owner_id(owner.id).await?)
    }

    pub async fn get(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<Pet> {
        self.authorize(identity, Action::Read, Some(id)).await?;
        self.pets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("pet"))
    }

    /// Create a pet under an owner; the engine scopes the check to that
    /// owner, so users may only create under their own profile
    pub async fn create(&self, identity: &AuthIdentity, request: CreatePetRequest) -> ApiResult<Pet> {
        self.authorize(identity, Action::Create, Some(request.owner_id))
            .await?;

        if self.owners.find_by_id(request.owner_id).await?.is_none() {
            return Err(ApiError::not_found("owner"));
        }

        let pet = Pet::new(
            request.name,
            request.breed,
            request.birth_date,
            request.owner_id,
        );
        let pet = self.pets.create(&pet).await?;
        info!(pet_id = %pet.id, owner_id = %pet.owner_id, "created pet");
        Ok(pet)
    }

    pub async fn update(
        &self,
        identity: &AuthIdentity,
        id: Uuid,
        request: UpdatePetRequest,
    ) -> ApiResult<Pet> {
        self.authorize(identity, Action::Update, Some(id)).await?;
        let mut pet = self
            .pets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("pet"))?;

        if let Some(name) = request.name {
            pet.name = name;
        }
        if let Some(breed) = request.breed {
            pet.breed = breed;
        }
        if let Some(birth_date) = request.birth_date {
            pet.birth_date = birth_date;
        }

        Ok(self.pets.update(&pet).await?)
    }

    /// Admin-only; removes the pet and its visits together
    pub async fn delete(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<()> {
        self.authorize(identity, Action::Delete, Some(id)).await?;
        if self.pets.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("pet"));
        }
        self.pets.delete(id).await?;
        info!(pet_id = %id, "deleted pet");
        Ok(())
    }

    async fn authorize(
        &self,
        identity: &AuthIdentity,
        action: Action,
        id: Option<Uuid>,
    ) -> ApiResult<()> {
        let decision = self
            .access
            .authorize(identity, action, ResourceKind::Pet, id)
            .await?;
        if decision.is_allowed() {
            Ok(())
        } else {
            Err(ApiError::Denied)
        }
    }
}
