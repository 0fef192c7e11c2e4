use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Password hashing and verification are CPU and memory heavy; they run on
/// the blocking pool and at most `max_concurrent_hashes` run at once.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    hashing_permits: Arc<Semaphore>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password codec and token issuer
    /// * `max_concurrent_hashes` - Bound on simultaneous hash/verify jobs (at least 1)
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        max_concurrent_hashes: usize,
    ) -> Self {
        Self {
            repository,
            authenticator,
            hashing_permits: Arc::new(Semaphore::new(max_concurrent_hashes.max(1))),
        }
    }

    /// Run a password job on the blocking pool.
    ///
    /// The permit moves into the job and is released only when the KDF
    /// finishes, even if the caller stops waiting.
    async fn run_blocking<T, F>(&self, job: F) -> Result<T, UserError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.hashing_permits)
            .acquire_owned()
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || {
            let output = job(&authenticator);
            drop(permit);
            output
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand {
            email,
            password,
            role,
        } = command;

        if self
            .repository
            .find_credential_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(email.as_str().to_string()));
        }

        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.as_str()))
            .await?
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            email,
            role,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, role = %created_user.role, "User created");

        Ok(created_user)
    }

    async fn login_user(&self, command: LoginCommand) -> Result<TokenPair, UserError> {
        let LoginCommand { email, password } = command;

        let Some(credential) = self.repository.find_credential_by_email(&email).await? else {
            tracing::debug!("Login attempt for unknown email");
            let error = self
                .run_blocking(move |authenticator| authenticator.reject_unknown(&password))
                .await?;
            return Err(error.into());
        };

        let user_id = credential.user_id;
        let tokens = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(
                    &password,
                    &credential.password_hash,
                    &credential.user_id.to_string(),
                )
            })
            .await??;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(tokens)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<String, UserError> {
        Ok(self.authenticator.refresh(refresh_token)?)
    }
}
