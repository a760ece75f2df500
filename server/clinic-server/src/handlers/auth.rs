use crate::error::{ApiError, ApiResult};
use crate::server::ClinicServer;
use auth_identity::{LoginResponse, RegisterRequest};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(length(max = 40, message = "phone is too long"))]
    pub phone: String,
    #[validate(length(max = 300, message = "address is too long"))]
    pub address: String,
}

/// Registration echo; never carries credentials or the role set
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(server): State<ClinicServer>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<Json<RegisterResponse>> {
    body.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let user = server
        .identity
        .register(RegisterRequest {
            email: body.email,
            password: body.password,
            name: body.name,
            phone: body.phone,
            address: body.address,
        })
        .await?;

    Ok(Json(RegisterResponse {
        id: user.id,
        email: user.email,
    }))
}

pub async fn login(
    State(server): State<ClinicServer>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<LoginResponse>> {
    let response = server.identity.login(&body.email, &body.password).await?;
    Ok(Json(response))
}
