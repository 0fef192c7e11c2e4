//! Credential primitives shared by the user service.
//!
//! - Password hashing: self-describing Argon2id records, constant-time verification
//! - Session tokens: HS256 access/refresh tokens with a checked validity window
//! - Login coordination: verify a password, mint a token pair, refresh
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("correct-horse").unwrap();
//! assert!(hasher.verify("correct-horse", &hash).is_ok());
//! assert!(hasher.verify("wrong-horse", &hash).is_err());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{JwtHandler, SigningSecret, TokenKind};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret, "api.example.com");
//! let audience = vec!["svc-a".to_string()];
//! let token = handler
//!     .issue(TokenKind::Access, "u-1", &audience, Duration::minutes(30))
//!     .unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "u-1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::TokenSettings;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::CostParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::ConfigurationError;
pub use secret::SigningSecret;
