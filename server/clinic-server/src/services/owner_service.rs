use crate::error::{ApiError, ApiResult};
use auth_access::{AccessEngine, Action, ResourceKind};
use auth_identity::normalize_email;
use auth_token::AuthIdentity;
use clinic_registry::{AccountEraser, CascadeReport, Owner, OwnerRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UpdateOwnerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Owner profile operations, every access gated by the engine
pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
    access: Arc<AccessEngine>,
    eraser: Arc<AccountEraser>,
}

impl OwnerService {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        access: Arc<AccessEngine>,
        eraser: Arc<AccountEraser>,
    ) -> Self {
        Self {
            owners,
            access,
            eraser,
        }
    }

    pub async fn list(&self, identity: &AuthIdentity) -> ApiResult<Vec<Owner>> {
        self.authorize(identity, Action::Read, None).await?;
        Ok(self.owners.list().await?)
    }

    pub async fn get(&self, identity: &AuthIdentity, id: Uuid) -> ApiResult<Owner> {
        self.authorize(identity, Action::Read, Some(id)).await?;
        self.owners
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))
    }

    /// The caller's own profile, resolved through the 1:1 user link
    pub async fn me(&self, identity: &AuthIdentity) -> ApiResult<Owner> {
        self.owners
            .find_by_user_id(identity.subject_id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))
    }

    /// Administrative lookup by account email
    pub async fn get_by_email(&self, identity: &AuthIdentity, email: &str) -> ApiResult<Owner> {
        self.authorize(identity, Action::Read, None).await?;
        self.owners
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))
    }

    pub async fn update(
        &self,
        identity: &AuthIdentity,
        id: Uuid,
        request: UpdateOwnerRequest,
    ) -> ApiResult<Owner> {
        self.authorize(identity, Action::Update, Some(id)).await?;
        let mut owner = self
            .owners
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))?;

        if let Some(name) = request.name {
            owner.name = name;
        }
        if let Some(phone) = request.phone {
            owner.phone = phone;
        }
        if let Some(address) = request.address {
            owner.address = address;
        }

        Ok(self.owners.update(&owner).await?)
    }

    /// Remove the owner's whole account: user, owner, pets, visits, as
    /// one transaction. Reserved to SuperAdmin by the engine.
    pub async fn delete_cascade(
        &self,
        identity: &AuthIdentity,
        owner_id: Uuid,
    ) -> ApiResult<CascadeReport> {
        // Authorization runs before the lookup so a denied caller learns
        // nothing about whether the owner exists.
        let decision = self
            .access
            .authorize(identity, Action::Delete, ResourceKind::Account, Some(owner_id))
            .await?;
        if !decision.is_allowed() {
            return Err(ApiError::Denied);
        }

        let owner = self
            .owners
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| ApiError::not_found("owner"))?;

        let report = self.eraser.delete_account_cascade(owner.user_id).await?;
        info!(owner_id = %owner_id, user_id = %owner.user_id, "account removed by cascade");
        Ok(report)
    }

    async fn authorize(
        &self,
        identity: &AuthIdentity,
        action: Action,
        id: Option<Uuid>,
    ) -> ApiResult<()> {
        let decision = self
            .access
            .authorize(identity, action, ResourceKind::Owner, id)
            .await?;
        if decision.is_allowed() {
            Ok(())
        } else {
            Err(ApiError::Denied)
        }
    }
}
