use thiserror::Error;

/// Error type for password operations.
///
/// Verification only ever reports `InvalidCredential`: a malformed stored
/// record and a wrong password are indistinguishable to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("invalid credential")]
    InvalidCredential,

    #[error("Password hashing failed: {0}")]
    CryptoFailure(String),
}
