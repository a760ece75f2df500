use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::server::ClinicServer;
use crate::services::visit_service::{CreateVisitRequest, UpdateVisitRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_registry::Visit;
use uuid::Uuid;

pub async fn list_visits(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Visit>>> {
    Ok(Json(server.visits.list(&identity).await?))
}

pub async fn my_visits(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
) -> ApiResult<Json<Vec<Visit>>> {
    Ok(Json(server.visits.list_mine(&identity).await?))
}

pub async fn get_visit(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Visit>> {
    Ok(Json(server.visits.get(&identity, id).await?))
}

pub async fn create_visit(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Json(body): Json<CreateVisitRequest>,
) -> ApiResult<Json<Visit>> {
    Ok(Json(server.visits.create(&identity, body).await?))
}

pub async fn update_visit(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVisitRequest>,
) -> ApiResult<Json<Visit>> {
    Ok(Json(server.visits.update(&identity, id, body).await?))
}

pub async fn delete_visit(
    State(server): State<ClinicServer>,
    AuthContext(identity): AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    server.visits.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
