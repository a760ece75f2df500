//! PetClinic Engine HTTP server
//!
//! The boundary in front of the auth/ownership core: bearer-token
//! extraction, the role-gated resource endpoints, and the mapping from
//! core errors to HTTP statuses (401 for token failures, 403 for denials,
//! 404 for missing resources, 503 for storage faults).

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;

pub use error::*;
pub use server::{ClinicServer, ServerConfig};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
pub fn create_app(server: ClinicServer) -> Router {
    routes::create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}
