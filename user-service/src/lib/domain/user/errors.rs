use auth::AuthenticationError;
use auth::JwtError;
use error_model::ErrorKind;
use error_model::StructuredError;
use error_model::ValidationError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("is required")]
    Required,

    #[error("must be a valid email address")]
    InvalidFormat,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

/// Error for password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("is required")]
    Required,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },
}

/// Error for role conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("invalid user role")]
    Unspecified,

    #[error("invalid user role")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("invalid input data")]
    Validation(#[from] ValidationError),

    #[error("email already exist")]
    EmailAlreadyExists(String),

    #[error("invalid credential")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::JwtError(JwtError::Unauthenticated(_)) => UserError::InvalidToken,
            AuthenticationError::JwtError(e) => UserError::Unknown(e.to_string()),
            AuthenticationError::PasswordError(e) => UserError::Hashing(e.to_string()),
        }
    }
}

impl From<UserError> for StructuredError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => e.into(),
            UserError::EmailAlreadyExists(_) => {
                StructuredError::new(ErrorKind::AlreadyExists, err.to_string())
            }
            UserError::InvalidCredentials | UserError::InvalidToken => {
                StructuredError::new(ErrorKind::Unauthenticated, err.to_string())
            }
            UserError::Hashing(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                StructuredError::internal(err)
            }
        }
    }
}
