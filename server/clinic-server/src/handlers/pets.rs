use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::server::ClinicServer;
use crate::services::pet_service::{CreatePetRequest, UpdatePetRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_registry::{Pet, Visit};
use uuid::Uuid;

pub async fn list_pets(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Pet>>> {
    Ok(Json(server.pets.list(&identity).await?))
}

pub async fn my_pets(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Pet>>> {
    Ok(Json(server.pets.list_mine(&identity).await?))
}

pub async fn get_pet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Pet>> {
    Ok(Json(server.pets.get(&identity, id).await?))
}

pub async fn create_pet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Json(body): Json<CreatePetRequest>,
) -> ApiResult<Json<Pet>> {
    Ok(Json(server.pets.create(&identity, body).await?))
}

pub async fn update_pet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePetRequest>,
) -> ApiResult<Json<Pet>> {
    Ok(Json(server.pets.update(&identity, id, body).await?))
}

pub async fn delete_pet(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    server.pets.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pet_visits(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Visit>>> {
    Ok(Json(server.visits.list_for_pet(&identity, id).await?))
}
