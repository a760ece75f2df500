use crate::error::{ApiError, ApiResult};
use auth_access::{AccessEngine, Action, ResourceKind};
use auth_token::AuthIdentity;
use clinic_registry::{Vet, VetRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateVetRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVetRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

/// Vet directory operations; reads are open to every authenticated role,
/// writes require admin, deletion is reserved to SuperAdmin
pub struct VetService {
    vets: Arc<dyn VetRepository>,
    access: Arc<AccessEngine>,
}

impl VetService {
    pub fn new(vets: Arc<dyn VetRepository>, access: Arc<AccessEngine>) -> Self {
        Self { vets, access }
    }

    pub async fn list(&self, identity: &AuthIdentity) -> ApiResult<Vec<Vet>> {
        self.authorize(identity, Action::Read, None).await?;
        Ok(self.vets.list().await?)
    }

    pub async fn get(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<Vet> {
        self.authorize(identity, Action::Read, Some(id)).await?;
        self.vets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("vet"))
    }

    pub async fn create(&self, identity: &AuthIdentity, request: CreateVetRequest) -> ApiResult<Vet> {
        self.authorize(identity, Action::Create, None).await?;
        let vet = Vet::new(
            request.name,
            request.email,
            request.phone,
            request.specialization,
        );
        let vet = self.vets.create(&vet).await?;
        info!(vet_id = %vet.id, "created vet");
        Ok(vet)
    }

    pub async fn update(
        &self,
        identity: &AuthIdentity,
        id: Uuid,
        request: UpdateVetRequest,
    ) -> ApiResult<Vet> {
        self.authorize(identity, Action::Update, Some(id)).await?;
        let mut vet = self
            .vets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("vet"))?;

        if let Some(name) = request.name {
            vet.name = name;
        }
        if let Some(email) = request.email {
            vet.email = email;
        }
        if let Some(phone) = request.phone {
            vet.phone = phone;
        }
        if let Some(specialization) = request.specialization {
            vet.specialization = specialization;
        }

        Ok(self.vets.update(&vet).await?)
    }

    pub async fn delete(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<()> {
        self.authorize(identity, Action::Delete, Some(id)).await?;
        if self.vets.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("vet"));
        }
        self.vets.delete(id).await?;
        info!(vet_id = %id, "deleted vet");
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
            .authorize(identity, action, ResourceKind::Vet, id)
            .await?;
        if decision.is_allowed() {
            Ok(())
        } else {
            Err(ApiError::Denied)
        }
    }
}
