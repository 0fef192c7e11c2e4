use async_trait::async_trait;
use error_model::StructuredError;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SessionTokens;

/// Remote user operations reachable from the gateway.
///
/// Every failure arrives already decoded into a [`StructuredError`], whatever
/// transport produced it.
#[async_trait]
pub trait UserGateway: Send + Sync + 'static {
    /// Register a user and return its id.
    async fn create_user(&self, new_user: NewUser) -> Result<String, StructuredError>;

    async fn login(&self, credentials: Credentials) -> Result<SessionTokens, StructuredError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: String) -> Result<String, StructuredError>;
}
