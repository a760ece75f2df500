use crate::config::IdentityConfig;
use crate::error::{IdentityError, Result};
use crate::models::{normalize_email, LoginResponse, OwnerProfile, RegisterRequest, User};
use crate::repository::CredentialRepository;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use auth_token::{Role, TokenCodec};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Authenticator in front of the credential store
///
/// Verifies submitted credentials and issues tokens on success. All lookups
/// run on the normalized email.
pub struct IdentityService {
    repo: Arc<dyn CredentialRepository>,
    codec: Arc<TokenCodec>,
    config: IdentityConfig,
    argon2: Argon2<'static>,
}

impl IdentityService {
    pub fn new(
        repo: Arc<dyn CredentialRepository>,
        codec: Arc<TokenCodec>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            repo,
            codec,
            config,
            argon2: Argon2::default(),
        }
    }

    /// Register a new account with role USER and its paired owner profile
    ///
    /// The user and owner rows are written as one atomic unit; a failed
    /// owner write rolls the user write back at the storage layer.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let email = normalize_email(&request.email);

        if !is_valid_email(&email) {
            return Err(IdentityError::Validation("invalid email format".into()));
        }
        self.validate_password(&request.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(IdentityError::DuplicateEmail);
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = User::new(
            email.clone(),
            request.name.clone(),
            password_hash,
            [Role::User].into_iter().collect(),
        );
        let profile = OwnerProfile {
            name: request.name,
            email,
            phone: request.phone,
            address: request.address,
        };

        let user = self.repo.create_user_with_owner(&user, &profile).await?;
        info!(user_id = %user.id, "registered new account");
        Ok(user)
    }

    /// Verify credentials and issue a token carrying the stored role set
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let email = normalize_email(email);
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        self.verify_password(password, &user.password_hash)?;

        let issued = self.codec.issue(user.id, &user.email, &user.roles)?;
        debug!(user_id = %user.id, "login succeeded");

        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Create a privileged account if the email is not yet taken
    ///
    /// Used by startup seeding; no owner profile is paired with these
    /// accounts.
    pub async fn ensure_account(
        &self,
        email: &str,
        name: &str,
        password: &str,
        roles: HashSet<Role>,
    ) -> Result<()> {
        let email = normalize_email(email);
        if self.repo.exists_by_email(&email).await? {
            debug!(%email, "account already present, skipping seed");
            return Ok(());
        }

        let password_hash = self.hash_password(password)?;
        let user = User::new(email.clone(), name, password_hash, roles);
        self.repo.create_user(&user).await?;
        info!(%email, "seeded account");
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| IdentityError::Hashing)?
            .to_string();
        Ok(hash)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<()> {
        let parsed = PasswordHash::new(hash).map_err(|_| {
            warn!("stored password hash failed to parse");
            IdentityError::Hashing
        })?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| IdentityError::InvalidCredentials)
    }

    fn validate_password(&self, password: &str) -> Result<()> {
        if password.len() < self.config.password_min_length {
            return Err(IdentityError::Validation(format!(
                "password must be at least {} characters",
                self.config.password_min_length
            )));
        }
        if self.config.password_require_numbers && !password.chars().any(|c| c.is_numeric()) {
            return Err(IdentityError::Validation(
                "password must contain a number".into(),
            ));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerProfile;
    use async_trait::async_trait;
    use auth_token::TokenConfig;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal credential store double for service-level tests
    #[derive(Default)]
    struct MemRepo {
        users: Mutex<HashMap<Uuid, User>>,
        owners: Mutex<HashMap<Uuid, OwnerProfile>>,
    }

    #[async_trait]
    impl CredentialRepository for MemRepo {
        async fn create_user(&self, user: &User) -> crate::error::Result<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn create_user_with_owner(
            &self,
            user: &User,
            profile: &OwnerProfile,
        ) -> crate::error::Result<User> {
            let mut users = self.users.lock().unwrap();
            let mut owners = self.owners.lock().unwrap();
            users.insert(user.id, user.clone());
            owners.insert(user.id, profile.clone());
            Ok(user.clone())
        }

        async fn find_by_email(&self, email: &str) -> crate::error::Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &str) -> crate::error::Result<bool> {
            Ok(self.find_by_email(email).await?.is_some())
        }

        async fn find_by_id(&self, id: Uuid) -> crate::error::Result<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn delete_role_associations(&self, user_id: Uuid) -> crate::error::Result<()> {
            if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
                user.roles.clear();
            }
            Ok(())
        }

        async fn delete_user(&self, user_id: Uuid) -> crate::error::Result<()> {
            self.users.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    fn service() -> IdentityService {
        IdentityService::new(
            Arc::new(MemRepo::default()),
            Arc::new(TokenCodec::new(TokenConfig::new("test-secret"))),
            IdentityConfig::default(),
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "password1".to_string(),
            name: "Test Owner".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Clinic Way".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips_identity() {
        let service = service();
        let user = service.register(register_request("A@X.com ")).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(user.roles.contains(&Role::User));

        let login = service.login("a@x.com", "password1").await.unwrap();
        assert!(!login.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();

        let err = service
            .register(register_request("A@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateEmail));
    }

    #[tokio::test]
    async fn unknown_account_and_wrong_password_are_indistinguishable() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();

        let missing = service.login("b@x.com", "password1").await.unwrap_err();
        let wrong = service.login("a@x.com", "wrong-password").await.unwrap_err();

        assert!(matches!(missing, IdentityError::InvalidCredentials));
        assert!(matches!(wrong, IdentityError::InvalidCredentials));
        assert_eq!(missing.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn short_password_fails_validation() {
        let service = service();
        let mut request = register_request("a@x.com");
        request.password = "short".to_string();

        let err = service.register(request).await.unwrap_err();
        assert!(matches!(err, IdentityError::Validation(_)));
    }

    #[tokio::test]
    async fn seeded_account_is_not_reseeded() {
        let service = service();
        let roles: HashSet<Role> = [Role::SuperAdmin].into_iter().collect();
        service
            .ensure_account("root@x.com", "Root", "rootpass1", roles.clone())
            .await
            .unwrap();
        service
            .ensure_account("root@x.com", "Root", "changed-pass", roles)
            .await
            .unwrap();

        // The original password still works: the second seed was a no-op.
        service.login("root@x.com", "rootpass1").await.unwrap();
    }
}
