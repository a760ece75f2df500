use crate::eraser::{AccountCascade, CascadeStore};
use crate::error::{RegistryError, Result};
use crate::models::{Owner, Pet, Vet, Visit};
use crate::repository::{OwnerRepository, PetRepository, VetRepository, VisitRepository};
use async_trait::async_trait;
use auth_identity::{CredentialRepository, IdentityError, OwnerProfile, User};
use auth_token::Role;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Relational layout held under one lock
///
/// Role associations live in their own map, mirroring the many-to-many
/// user_roles table; the rows in `users` carry an empty role set and are
/// hydrated on read.
#[derive(Default)]
struct ClinicState {
    users: HashMap<Uuid, User>,
    user_roles: HashMap<Uuid, HashSet<Role>>,
    owners: HashMap<Uuid, Owner>,
    pets: HashMap<Uuid, Pet>,
    vets: HashMap<Uuid, Vet>,
    visits: HashMap<Uuid, Visit>,
}

impl ClinicState {
    fn hydrate(&self, user: &User) -> User {
        let mut user = user.clone();
        user.roles = self.user_roles.get(&user.id).cloned().unwrap_or_default();
        user
    }
}

/// In-memory reference store for development and testing
///
/// All tables sit behind a single lock so that multi-row writes (the
/// registration pair, the account cascade) are atomic: a writer either
/// commits every row or none. The availability toggle lets tests exercise
/// the `StorageUnavailable` paths.
pub struct InMemoryClinicStore {
    state: RwLock<ClinicState>,
    available: AtomicBool,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ClinicState::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate a storage outage; every operation fails until re-enabled
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn guard(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RegistryError::Unavailable)
        }
    }

    fn guard_credentials(&self) -> std::result::Result<(), IdentityError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(IdentityError::StorageUnavailable)
        }
    }
}

impl Default for InMemoryClinicStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryClinicStore {
    async fn create_user(&self, user: &User) -> std::result::Result<User, IdentityError> {
        self.guard_credentials()?;
        let mut state = self.state.write();
        if state.users.values().any(|u| u.email == user.email) {
            return Err(IdentityError::DuplicateEmail);
        }

        let mut row = user.clone();
        let roles = std::mem::take(&mut row.roles);
        state.user_roles.insert(row.id, roles);
        state.users.insert(row.id, row);
        Ok(user.clone())
    }

    async fn create_user_with_owner(
        &self,
        user: &User,
        profile: &OwnerProfile,
    ) -> std::result::Result<User, IdentityError> {
        self.guard_credentials()?;
        let mut state = self.state.write();

        // Both checks run before either insert; the pair commits or
        // neither row does.
        if state.users.values().any(|u| u.email == user.email) {
            return Err(IdentityError::DuplicateEmail);
        }
        if state.owners.values().any(|o| o.user_id == user.id) {
            return Err(IdentityError::Validation(
                "user already has an owner profile".into(),
            ));
        }

        let owner = Owner::new(
            profile.name.clone(),
            profile.email.clone(),
            profile.phone.clone(),
            profile.address.clone(),
            user.id,
        );

        let mut row = user.clone();
        let roles = std::mem::take(&mut row.roles);
        state.user_roles.insert(row.id, roles);
        state.users.insert(row.id, row);
        state.owners.insert(owner.id, owner);
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> std::result::Result<Option<User>, IdentityError> {
        self.guard_credentials()?;
        let state = self.state.read();
        Ok(state
            .users
            .values()
            .find(|u| u.email == email)
            .map(|u| state.hydrate(u)))
    }

    async fn exists_by_email(&self, email: &str) -> std::result::Result<bool, IdentityError> {
        self.guard_credentials()?;
        let state = self.state.read();
        Ok(state.users.values().any(|u| u.email == email))
    }

    async fn find_by_id(&self, id: Uuid) -> std::result::Result<Option<User>, IdentityError> {
        self.guard_credentials()?;
        let state = self.state.read();
        Ok(state.users.get(&id).map(|u| state.hydrate(u)))
    }

    async fn delete_role_associations(&self, user_id: Uuid) -> std::result::Result<(), IdentityError> {
        self.guard_credentials()?;
        self.state.write().user_roles.remove(&user_id);
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> std::result::Result<(), IdentityError> {
        self.guard_credentials()?;
        self.state.write().users.remove(&user_id);
        Ok(())
    }
}

#[async_trait]
impl OwnerRepository for InMemoryClinicStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Owner>> {
        self.guard()?;
        Ok(self.state.read().owners.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Owner>> {
        self.guard()?;
        Ok(self
            .state
            .read()
            .owners
            .values()
            .find(|o| o.user_id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>> {
        self.guard()?;
        Ok(self
            .state
            .read()
            .owners
            .values()
            .find(|o| o.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Owner>> {
        self.guard()?;
        Ok(self.state.read().owners.values().cloned().collect())
    }

    async fn create(&self, owner: &Owner) -> Result<Owner> {
        self.guard()?;
        let mut state = self.state.write();
        if state.owners.values().any(|o| o.user_id == owner.user_id) {
            return Err(RegistryError::Conflict(format!(
                "user {} already has an owner profile",
                owner.user_id
            )));
        }
        state.owners.insert(owner.id, owner.clone());
        Ok(owner.clone())
    }

    async fn update(&self, owner: &Owner) -> Result<Owner> {
        self.guard()?;
        let mut state = self.state.write();
        if !state.owners.contains_key(&owner.id) {
            return Err(RegistryError::not_found("owner", owner.id));
        }
        state.owners.insert(owner.id, owner.clone());
        Ok(owner.clone())
    }
}

#[async_trait]
impl PetRepository for InMemoryClinicStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>> {
        self.guard()?;
        Ok(self.state.read().pets.get(&id).cloned())
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Pet>> {
        self.guard()?;
        Ok(self
            .state
            .read()
            .pets
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        self.guard()?;
        Ok(self.state.read().pets.values().cloned().collect())
    }

    async fn create(&self, pet: &Pet) -> Result<Pet> {
        self.guard()?;
        let mut state = self.state.write();
        if !state.owners.contains_key(&pet.owner_id) {
            return Err(RegistryError::not_found("owner", pet.owner_id));
        }
        state.pets.insert(pet.id, pet.clone());
        Ok(pet.clone())
    }

    async fn update(&self, pet: &Pet) -> Result<Pet> {
        self.guard()?;
        let mut state = self.state.write();
        if !state.pets.contains_key(&pet.id) {
            return Err(RegistryError::not_found("pet", pet.id));
        }
        state.pets.insert(pet.id, pet.clone());
        Ok(pet.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.guard()?;
        let mut state = self.state.write();
        if state.pets.remove(&id).is_none() {
            return Err(RegistryError::not_found("pet", id));
        }
        // A visit cannot outlive its pet.
        state.visits.retain(|_, v| v.pet_id != id);
        debug!(pet_id = %id, "deleted pet and dependent visits");
        Ok(())
    }
}

#[async_trait]
impl VetRepository for InMemoryClinicStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vet>> {
        self.guard()?;
        Ok(self.state.read().vets.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Vet>> {
        self.guard()?;
        Ok(self.state.read().vets.values().cloned().collect())
    }

    async fn create(&self, vet: &Vet) -> Result<Vet> {
        self.guard()?;
        self.state.write().vets.insert(vet.id, vet.clone());
        Ok(vet.clone())
    }

    async fn update(&self, vet: &Vet) -> Result<Vet> {
        self.guard()?;
        let mut state = self.state.write();
        if !state.vets.contains_key(&vet.id) {
            return Err(RegistryError::not_found("vet", vet.id));
        }
        state.vets.insert(vet.id, vet.clone());
        Ok(vet.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.guard()?;
        if self.state.write().vets.remove(&id).is_none() {
            return Err(RegistryError::not_found("vet", id));
        }
        Ok(())
    }
}

#[async_trait]
impl VisitRepository for InMemoryClinicStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Visit>> {
        self.guard()?;
        Ok(self.state.read().visits.get(&id).cloned())
    }

    async fn find_by_pet_id(&self, pet_id: Uuid) -> Result<Vec<Visit>> {
        self.guard()?;
        Ok(self
            .state
            .read()
            .visits
            .values()
            .filter(|v| v.pet_id == pet_id)
            .cloned()
            .collect())
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Visit>> {
        self.guard()?;
        let state = self.state.read();
        Ok(state
            .visits
            .values()
            .filter(|v| {
                state
                    .pets
                    .get(&v.pet_id)
                    .is_some_and(|p| p.owner_id == owner_id)
            })
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Visit>> {
        self.guard()?;
        Ok(self.state.read().visits.values().cloned().collect())
    }

    async fn create(&self, visit: &Visit) -> Result<Visit> {
        self.guard()?;
        let mut state = self.state.write();
        if !state.pets.contains_key(&visit.pet_id) {
            return Err(RegistryError::not_found("pet", visit.pet_id));
        }
        if !state.vets.contains_key(&visit.vet_id) {
            return Err(RegistryError::not_found("vet", visit.vet_id));
        }
        state.visits.insert(visit.id, visit.clone());
        Ok(visit.clone())
    }

    async fn update(&self, visit: &Visit) -> Result<Visit> {
        self.guard()?;
        let mut state = self.state.write();
        let current = state
            .visits
            .get(&visit.id)
            .ok_or(RegistryError::not_found("visit", visit.id))?;
        if !current.status.can_transition_to(visit.status) {
            return Err(RegistryError::InvalidTransition {
                from: current.status,
                to: visit.status,
            });
        }
        state.visits.insert(visit.id, visit.clone());
        Ok(visit.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.guard()?;
        if self.state.write().visits.remove(&id).is_none() {
            return Err(RegistryError::not_found("visit", id));
        }
        Ok(())
    }
}

#[async_trait]
impl CascadeStore for InMemoryClinicStore {
    async fn apply_cascade(&self, cascade: &AccountCascade) -> Result<()> {
        self.guard()?;
        let mut state = self.state.write();

        // Validate under the same lock the mutations run under; a cascade
        // racing a second delete of the same account loses here and
        // nothing below executes.
        if !state.users.contains_key(&cascade.user_id) {
            return Err(RegistryError::not_found("user", cascade.user_id));
        }

        for visit_id in &cascade.visit_ids {
            state.visits.remove(visit_id);
        }
        for pet_id in &cascade.pet_ids {
            state.pets.remove(pet_id);
        }
        if let Some(owner_id) = cascade.owner_id {
            state.owners.remove(&owner_id);
        }
        state.user_roles.remove(&cascade.user_id);
        state.users.remove(&cascade.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(email: &str) -> User {
        User::new(email, "Test", "hash", [Role::User].into_iter().collect())
    }

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn registration_pair_is_atomic_and_visible() {
        let store = InMemoryClinicStore::new();
        let user = user("a@x.com");
        let profile = OwnerProfile {
            name: "A".into(),
            email: "a@x.com".into(),
            phone: "555".into(),
            address: "addr".into(),
        };

        store.create_user_with_owner(&user, &profile).await.unwrap();

        let stored = CredentialRepository::find_by_email(&store, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.roles.contains(&Role::User));
        let owner = OwnerRepository::find_by_user_id(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner.email, "a@x.com");
    }

    #[tokio::test]
    async fn duplicate_email_leaves_no_partial_rows() {
        let store = InMemoryClinicStore::new();
        let first = user("a@x.com");
        let profile = OwnerProfile {
            name: "A".into(),
            email: "a@x.com".into(),
            phone: "555".into(),
            address: "addr".into(),
        };
        store.create_user_with_owner(&first, &profile).await.unwrap();

        let second = user("a@x.com");
        let err = store
            .create_user_with_owner(&second, &profile)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateEmail));
        assert!(CredentialRepository::find_by_id(&store, second.id)
            .await
            .unwrap()
            .is_none());
        assert!(OwnerRepository::find_by_user_id(&store, second.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn second_owner_for_same_user_conflicts() {
        let store = InMemoryClinicStore::new();
        let user_id = Uuid::new_v4();
        let owner = Owner::new("A", "a@x.com", "555", "addr", user_id);
        OwnerRepository::create(&store, &owner).await.unwrap();

        let duplicate = Owner::new("A2", "a2@x.com", "555", "addr", user_id);
        let err = OwnerRepository::create(&store, &duplicate).await.unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
    }

    #[tokio::test]
    async fn pet_delete_removes_dependent_visits() {
        let store = InMemoryClinicStore::new();
        let owner = Owner::new("A", "a@x.com", "555", "addr", Uuid::new_v4());
        OwnerRepository::create(&store, &owner).await.unwrap();
        let pet = Pet::new("Rex", "Beagle", birth_date(), owner.id);
        PetRepository::create(&store, &pet).await.unwrap();
        let vet = Vet::new("Dr. B", "b@clinic.dev", "555", "surgery");
        VetRepository::create(&store, &vet).await.unwrap();
        let visit = Visit::new(birth_date(), "checkup", pet.id, vet.id);
        VisitRepository::create(&store, &visit).await.unwrap();

        PetRepository::delete(&store, pet.id).await.unwrap();

        assert!(VisitRepository::find_by_id(&store, visit.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn visit_update_rejects_invalid_transition() {
        let store = InMemoryClinicStore::new();
        let owner = Owner::new("A", "a@x.com", "555", "addr", Uuid::new_v4());
        OwnerRepository::create(&store, &owner).await.unwrap();
        let pet = Pet::new("Rex", "Beagle", birth_date(), owner.id);
        PetRepository::create(&store, &pet).await.unwrap();
        let vet = Vet::new("Dr. B", "b@clinic.dev", "555", "surgery");
        VetRepository::create(&store, &vet).await.unwrap();
        let mut visit = Visit::new(birth_date(), "checkup", pet.id, vet.id);
        VisitRepository::create(&store, &visit).await.unwrap();

        visit.status = crate::models::VisitStatus::Completed;
        VisitRepository::update(&store, &visit).await.unwrap();

        visit.status = crate::models::VisitStatus::Upcoming;
        let err = VisitRepository::update(&store, &visit).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn role_associations_are_deleted_separately_from_the_user_row() {
        let store = InMemoryClinicStore::new();
        let user = user("a@x.com");
        store.create_user(&user).await.unwrap();

        store.delete_role_associations(user.id).await.unwrap();
        let stored = CredentialRepository::find_by_id(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.roles.is_empty());

        store.delete_user(user.id).await.unwrap();
        assert!(CredentialRepository::find_by_id(&store, user.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = InMemoryClinicStore::new();
        store.set_available(false);

        let err = CredentialRepository::find_by_email(&store, "a@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::StorageUnavailable));
        let err = OwnerRepository::list(&store).await.unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable));
    }
}
