use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::server::ClinicServer;
use crate::services::vet_service::{CreateVetRequest, UpdateVetRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_registry::Vet;
use uuid::Uuid;

pub async fn list_vets(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Vet>>> {
    Ok(Json(server.vets.list(&identity).await?))
}

pub async fn get_vet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vet>> {
    Ok(Json(server.vets.get(&identity, id).await?))
}

pub async fn create_vet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Json(body): Json<CreateVetRequest>,
) -> ApiResult<Json<Vet>> {
    Ok(Json(server.vets.create(&identity, body).await?))
}

pub async fn update_vet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVetRequest>,
) -> ApiResult<Json<Vet>> {
    Ok(Json(server.vets.update(&identity, id, body).await?))
}

pub async fn delete_vet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    server.vets.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
