use crate::error::{ApiError, ApiResult};
use auth_access::{AccessEngine, Action, ResourceKind};
use auth_token::AuthIdentity;
use chrono::NaiveDate;
use clinic_registry::{
    OwnerRepository, PetRepository, VetRepository, Visit, VisitRepository, VisitStatus,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateVisitRequest {
    pub pet_id: Uuid,
    pub vet_id: Uuid,
    pub visit_date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVisitRequest {
    pub visit_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<VisitStatus>,
}

pub struct VisitService {
    visits: Arc<dyn VisitRepository>,
    pets: Arc<dyn PetRepository>,
    vets: Arc<dyn VetRepository>,
    owners: Arc<dyn OwnerRepository>,
    access: Arc<AccessEngine>,
}

impl VisitService {
    pub fn new(
        visits: Arc<dyn VisitRepository>,
        pets: Arc<dyn PetRepository>,
        vets: Arc<dyn VetRepository>,
        owners: Arc<dyn OwnerRepository>,
        access: Arc<AccessEngine>,
    ) -> Self {
        Self {
            visits,
            pets,
            vets,
            owners,
            access,
        }
    }

    pub async fn list(&self, identity: &AuthIdentity) -> ApiResult<Vec<Visit>> {
        self.authorize(identity, Action::Read, None).await?;
        Ok(self.visits.list().await?)
    }

    /// All visits of all pets of the caller's own owner profile
    pub async fn list_mine(&self, identity: &AuthIdentity) -> ApiResult<Vec<Visit>> {
        let owner = self
            .owners
            .find_by_user_id(identity.subject_id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))?;
        Ok(self.visits.find_by_owner_id(owner.id).await?)
    }

    pub async fn get(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<Visit> {
        self.authorize(identity, Action::Read, Some(id)).await?;
        self.visits
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("visit"))
    }

    /// Visits of one pet; reading them is reading the pet
    pub async fn list_for_pet(&self, identity: &AuthIdentity, pet_id: Uuid) -> ApiResult<Vec<Visit>> {
        let decision = self
            .access
            .authorize(identity, Action::Read, ResourceKind::Pet, Some(pet_id))
            .await?;
        if !decision.is_allowed() {
            return Err(ApiError::Denied);
        }
        if self.pets.find_by_id(pet_id).await?.is_none() {
            return Err(ApiError::not_found("pet"));
        }
        Ok(self.visits.find_by_pet_id(pet_id).await?)
    }

    /// Book a visit; the engine scopes the check to the pet, so users may
    /// only book for their own pets. The pet and vet must both exist.
    pub async fn create(
        &self,
        identity: &AuthIdentity,
        request: CreateVisitRequest,
    ) -> ApiResult<Visit> {
        self.authorize(identity, Action::Create, Some(request.pet_id))
            .await?;

        if self.pets.find_by_id(request.pet_id).await?.is_none() {
            return Err(ApiError::not_found("pet"));
        }
        if self.vets.find_by_id(request.vet_id).await?.is_none() {
            return Err(ApiError::not_found("vet"));
        }

        let visit = Visit::new(
            request.visit_date,
            request.description,
            request.pet_id,
            request.vet_id,
        );
        let visit = self.visits.create(&visit).await?;
        info!(visit_id = %visit.id, pet_id = %visit.pet_id, "booked visit");
        Ok(visit)
    }

    /// Update a visit; status may only move along the lifecycle
    /// (Upcoming to Completed or Cancelled, terminal states frozen)
    pub async fn update(
        &self,
        identity: &AuthIdentity,
        id: Uuid,
        request: UpdateVisitRequest,
    ) -> ApiResult<Visit> {
        self.authorize(identity, Action::Update, Some(id)).await?;
        let mut visit = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("visit"))?;

        if let Some(visit_date) = request.visit_date {
            visit.visit_date = visit_date;
        }
        if let Some(description) = request.description {
            visit.description = description;
        }
        if let Some(status) = request.status {
            visit.status = status;
        }

        Ok(self.visits.update(&visit).await?)
    }

    pub async fn delete(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<()> {
        self.authorize(identity, Action::Delete, Some(id)).await?;
        if self.visits.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("visit"));
        }
        self.visits.delete(id).await?;
        info!(visit_id = %id, "deleted visit");
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
            .authorize(identity, action, ResourceKind::Visit, id)
            .await?;
        if decision.is_allowed() {
            Ok(())
        } else {
            Err(ApiError::Denied)
        }
    }
}
