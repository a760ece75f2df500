use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::server::ClinicServer;
use crate::services::owner_service::UpdateOwnerRequest;
use axum::extract::{Path, State};
use axum::Json;
use clinic_registry::{CascadeReport, Owner};
use uuid::Uuid;

pub async fn list_owners(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Owner>>> {
    Ok(Json(server.owners.list(&identity).await?))
}

pub async fn my_owner(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Owner>> {
    Ok(Json(server.owners.me(&identity).await?))
}

pub async fn get_owner(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Owner>> {
    Ok(Json(server.owners.get(&identity, id).await?))
}

pub async fn owner_by_email(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(email): Path<String>,
) -> ApiResult<Json<Owner>> {
    Ok(Json(server.owners.get_by_email(&identity, &email).await?))
}

pub async fn update_owner(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateOwnerRequest>,
) -> ApiResult<Json<Owner>> {
    Ok(Json(server.owners.update(&identity, id, body).await?))
}

/// Account-with-cascade removal; SuperAdmin only
pub async fn delete_owner_cascade(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CascadeReport>> {
    Ok(Json(server.owners.delete_cascade(&identity, id).await?))
}
