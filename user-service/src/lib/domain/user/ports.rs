use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Check credentials and mint an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login_user(&self, command: LoginCommand) -> Result<TokenPair, UserError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, expired, or not a refresh token
    async fn refresh_token(&self, refresh_token: &str) -> Result<String, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve login material by email address.
    ///
    /// # Returns
    /// Credential, or None if no user has this email
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_credential_by_email(&self, email: &str)
        -> Result<Option<Credential>, UserError>;
}
