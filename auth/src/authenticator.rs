use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SigningSecret;

/// Issuer and lifetimes applied to every token minted by an [`Authenticator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub issuer: String,
    pub audience: Vec<String>,
    pub access_lifetime: Duration,
    pub refresh_lifetime: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            issuer: "api.example.com".to_string(),
            audience: Vec::new(),
            access_lifetime: Duration::minutes(30),
            refresh_lifetime: Duration::days(30),
        }
    }
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid credential")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error(transparent)]
    JwtError(#[from] JwtError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::InvalidCredential => Self::InvalidCredentials,
            other => Self::PasswordError(other),
        }
    }
}

/// Login coordinator combining password verification and token issuance.
///
/// Stateless apart from the keys and settings fixed at construction; share
/// one instance behind an `Arc`.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    settings: TokenSettings,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    /// * `password_hasher` - Codec used to hash and verify passwords
    /// * `settings` - Issuer, audience and token lifetimes
    pub fn new(
        secret: &SigningSecret,
        password_hasher: PasswordHasher,
        settings: TokenSettings,
    ) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret, settings.issuer.clone()),
            password_hasher,
            settings,
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash record
    /// * `subject` - User identifier written to both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the record is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.issue(TokenKind::Access, subject)?;
        let refresh_token = self.issue(TokenKind::Refresh, subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Performs the same KDF work as checking a wrong password, then returns
    /// the same error.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_decoy(password).into()
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `JwtError::Unauthenticated` - Token invalid, expired, or not a refresh token
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthenticationError> {
        let claims = self
            .jwt_handler
            .verify_kind(refresh_token, TokenKind::Refresh)?;

        Ok(self.issue(TokenKind::Access, &claims.sub)?)
    }

    /// Validate an access token presented on a request.
    ///
    /// # Errors
    /// * `JwtError::Unauthenticated` - Token invalid, expired, or not an access token
    pub fn validate_access(&self, token: &str) -> Result<Claims, AuthenticationError> {
        Ok(self.jwt_handler.verify_kind(token, TokenKind::Access)?)
    }

    fn issue(&self, kind: TokenKind, subject: &str) -> Result<String, JwtError> {
        let lifetime = match kind {
            TokenKind::Access => self.settings.access_lifetime,
            TokenKind::Refresh => self.settings.refresh_lifetime,
        };

        self.jwt_handler
            .issue(kind, subject, &self.settings.audience, lifetime)
    }
}
