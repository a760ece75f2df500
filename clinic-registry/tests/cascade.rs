//! Cascading account removal against the in-memory store.

use auth_identity::{CredentialRepository, OwnerProfile, User};
use auth_token::Role;
use chrono::NaiveDate;
use clinic_registry::{
    AccountEraser, InMemoryClinicStore, OwnerRepository, Pet, PetRepository, RegistryError, Vet,
    VetRepository, Visit, VisitRepository,
};
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    store: Arc<InMemoryClinicStore>,
    eraser: AccountEraser,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryClinicStore::new());
    let eraser = AccountEraser::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    Fixture { store, eraser }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

/// Registers an account with `pets` pets and one visit per pet; returns
/// (user id, pet ids, visit ids).
async fn seed_account(
    store: &InMemoryClinicStore,
    email: &str,
    pets: usize,
) -> (Uuid, Vec<Uuid>, Vec<Uuid>) {
    let user = User::new(email, "Owner", "hash", [Role::User].into_iter().collect());
    let profile = OwnerProfile {
        name: "Owner".into(),
        email: email.into(),
        phone: "555".into(),
        address: "addr".into(),
    };
    store.create_user_with_owner(&user, &profile).await.unwrap();
    let owner = OwnerRepository::find_by_user_id(store, user.id)
        .await
        .unwrap()
        .unwrap();

    let vet = Vet::new("Dr. V", "v@clinic.dev", "555", "general");
    VetRepository::create(store, &vet).await.unwrap();

    let mut pet_ids = Vec::new();
    let mut visit_ids = Vec::new();
    for i in 0..pets {
        let pet = Pet::new(format!("pet-{i}"), "Beagle", date(), owner.id);
        PetRepository::create(store, &pet).await.unwrap();
        let visit = Visit::new(date(), "checkup", pet.id, vet.id);
        VisitRepository::create(store, &visit).await.unwrap();
        pet_ids.push(pet.id);
        visit_ids.push(visit.id);
    }
    (user.id, pet_ids, visit_ids)
}

#[tokio::test]
async fn cascade_removes_user_owner_pets_and_visits() {
    let f = fixture();
    let (user_id, pet_ids, visit_ids) = seed_account(&f.store, "a@x.com", 2).await;
    let (other_user, other_pets, other_visits) = seed_account(&f.store, "b@x.com", 1).await;

    let report = f.eraser.delete_account_cascade(user_id).await.unwrap();
    assert!(report.owner_deleted);
    assert_eq!(report.pets_deleted, 2);
    assert_eq!(report.visits_deleted, 2);

    assert!(CredentialRepository::find_by_id(&*f.store, user_id)
        .await
        .unwrap()
        .is_none());
    assert!(OwnerRepository::find_by_user_id(&*f.store, user_id)
        .await
        .unwrap()
        .is_none());
    for pet_id in pet_ids {
        assert!(PetRepository::find_by_id(&*f.store, pet_id)
            .await
            .unwrap()
            .is_none());
    }
    for visit_id in visit_ids {
        assert!(VisitRepository::find_by_id(&*f.store, visit_id)
            .await
            .unwrap()
            .is_none());
    }

    // The unrelated account is untouched.
    assert!(CredentialRepository::find_by_id(&*f.store, other_user)
        .await
        .unwrap()
        .is_some());
    assert!(PetRepository::find_by_id(&*f.store, other_pets[0])
        .await
        .unwrap()
        .is_some());
    assert!(VisitRepository::find_by_id(&*f.store, other_visits[0])
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn deleting_twice_is_a_not_found_no_op() {
    let f = fixture();
    let (user_id, _, _) = seed_account(&f.store, "a@x.com", 1).await;
    let (survivor, _, _) = seed_account(&f.store, "b@x.com", 1).await;

    f.eraser.delete_account_cascade(user_id).await.unwrap();
    let err = f.eraser.delete_account_cascade(user_id).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));

    assert!(CredentialRepository::find_by_id(&*f.store, survivor)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn account_without_owner_profile_is_deletable() {
    let f = fixture();
    let admin = User::new(
        "admin@x.com",
        "Admin",
        "hash",
        [Role::Admin].into_iter().collect(),
    );
    f.store.create_user(&admin).await.unwrap();

    let report = f.eraser.delete_account_cascade(admin.id).await.unwrap();
    assert!(!report.owner_deleted);
    assert_eq!(report.pets_deleted, 0);

    assert!(CredentialRepository::find_by_id(&*f.store, admin.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn concurrent_cascades_on_different_accounts_both_complete() {
    let f = fixture();
    let (user_a, _, _) = seed_account(&f.store, "a@x.com", 2).await;
    let (user_b, _, _) = seed_account(&f.store, "b@x.com", 2).await;

    let eraser_a = Arc::new(f.eraser);
    let eraser_b = eraser_a.clone();
    let (ra, rb) = tokio::join!(
        tokio::spawn({
            let eraser = eraser_a.clone();
            async move { eraser.delete_account_cascade(user_a).await }
        }),
        tokio::spawn({
            let eraser = eraser_b.clone();
            async move { eraser.delete_account_cascade(user_b).await }
        }),
    );
    ra.unwrap().unwrap();
    rb.unwrap().unwrap();

    assert!(CredentialRepository::find_by_id(&*f.store, user_a)
        .await
        .unwrap()
        .is_none());
    assert!(CredentialRepository::find_by_id(&*f.store, user_b)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn storage_fault_surfaces_unavailable_and_mutates_nothing() {
    let f = fixture();
    let (user_id, pet_ids, _) = seed_account(&f.store, "a@x.com", 1).await;

    f.store.set_available(false);
    let err = f.eraser.delete_account_cascade(user_id).await.unwrap_err();
    assert!(matches!(err, RegistryError::Unavailable));

    f.store.set_available(true);
    assert!(CredentialRepository::find_by_id(&*f.store, user_id)
        .await
        .unwrap()
        .is_some());
    assert!(PetRepository::find_by_id(&*f.store, pet_ids[0])
        .await
        .unwrap()
        .is_some());

    // Retryable: the same call succeeds once storage is back.
    f.eraser.delete_account_cascade(user_id).await.unwrap();
}
