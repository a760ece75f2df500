use auth_access::{AccessEngine, OwnershipResolver};
use auth_identity::{IdentityConfig, IdentityService};
use auth_token::{TokenCodec, TokenConfig};
use clinic_registry::{AccountEraser, InMemoryClinicStore};
use std::sync::Arc;

use crate::services::{OwnerService, PetService, VetService, VisitService};

/// Server configuration assembled by the binary from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub token: TokenConfig,
    pub identity: IdentityConfig,
}

impl ServerConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            token: TokenConfig::new(secret),
            identity: IdentityConfig::default(),
        }
    }
}

/// Application state shared by every handler
#[derive(Clone)]
pub struct ClinicServer {
    pub codec: Arc<TokenCodec>,
    pub identity: Arc<IdentityService>,
    pub owners: Arc<OwnerService>,
    pub pets: Arc<PetService>,
    pub vets: Arc<VetService>,
    pub visits: Arc<VisitService>,
}

impl ClinicServer {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(Arc::new(InMemoryClinicStore::new()), config)
    }

    /// Wire the full stack over a provided store (shared with tests)
    pub fn with_store(store: Arc<InMemoryClinicStore>, config: ServerConfig) -> Self {
        let codec = Arc::new(TokenCodec::new(config.token));
        let identity = Arc::new(IdentityService::new(
            store.clone(),
            codec.clone(),
            config.identity,
        ));

        let resolver = OwnershipResolver::new(store.clone(), store.clone(), store.clone());
        let access = Arc::new(AccessEngine::new(resolver));

        let eraser = Arc::new(AccountEraser::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        ));

        let owners = Arc::new(OwnerService::new(store.clone(), access.clone(), eraser));
        let pets = Arc::new(PetService::new(store.clone(), store.clone(), access.clone()));
        let vets = Arc::new(VetService::new(store.clone(), access.clone()));
        let visits = Arc::new(VisitService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            access,
        ));

        Self {
            codec,
            identity,
            owners,
            pets,
            vets,
            visits,
        }
    }
}
