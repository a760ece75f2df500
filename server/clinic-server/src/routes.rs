use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{auth, health, owners, pets, vets, visits};
use crate::server::ClinicServer;

/// Create health check routes
pub fn health_routes() -> Router<ClinicServer> {
    Router::new().route("/api/health", get(health::health_check))
}

/// Create authentication routes; the only endpoints without a token
pub fn auth_routes() -> Router<ClinicServer> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

/// Create owner routes, including the account-with-cascade deletion
pub fn owner_routes() -> Router<ClinicServer> {
    Router::new()
        .route("/api/owners", get(owners::list_owners))
        .route("/api/owners/me", get(owners::my_owner))
        .route("/api/owners/by-email/:email", get(owners::owner_by_email))
        .route(
            "/api/owners/:id",
            get(owners::get_owner)
                .put(owners::update_owner)
                .delete(owners::delete_owner_cascade),
        )
}

/// Create pet routes
pub fn pet_routes() -> Router<ClinicServer> {
    Router::new()
        .route("/api/pets", get(pets::list_pets).post(pets::create_pet))
        .route("/api/pets/mine", get(pets::my_pets))
        .route(
            "/api/pets/:id",
            get(pets::get_pet).put(pets::update_pet).delete(pets::delete_pet),
        )
        .route("/api/pets/:id/visits", get(pets::pet_visits))
}

/// Create vet directory routes
pub fn vet_routes() -> Router<ClinicServer> {
    Router::new()
        .route("/api/vets", get(vets::list_vets).post(vets::create_vet))
        .route("/api/vets/:id", get(vets::get_vet))
        .route("/api/vets/:id", put(vets::update_vet))
        .route("/api/vets/:id", delete(vets::delete_vet))
}

/// Create visit routes
pub fn visit_routes() -> Router<ClinicServer> {
    Router::new()
        .route(
            "/api/visits",
            get(visits::list_visits).post(visits::create_visit),
        )
        .route("/api/visits/mine", get(visits::my_visits))
        .route(
            "/api/visits/:id",
            get(visits::get_visit)
                .put(visits::update_visit)
                .delete(visits::delete_visit),
        )
}

/// Merge every route group into the application router
pub fn create_routes() -> Router<ClinicServer> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(owner_routes())
        .merge(pet_routes())
        .merge(vet_routes())
        .merge(visit_routes())
}
