use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token operations.
///
/// Every verification failure is `Unauthenticated`, whose message is the
/// same for all reasons. The [`Rejection`] it carries is for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime must be positive and representable")]
    InvalidLifetime,

    #[error("invalid token")]
    Unauthenticated(Rejection),
}

/// Why a token was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature mismatch")]
    Signature,

    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,

    #[error("validity window is inconsistent")]
    InvalidWindow,

    #[error("unexpected issuer '{0}'")]
    Issuer(String),

    #[error("expected {expected:?} token, found {found:?}")]
    Kind { expected: TokenKind, found: TokenKind },
}
