use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::Rejection;

/// Distinguishes short-lived access tokens from long-lived refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Session token payload.
///
/// Timestamps are Unix seconds. A token issued here always satisfies
/// `exp > nbf >= iat`; verification rejects any token that does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issuing service
    pub iss: String,

    /// Intended recipients, in the order they were given
    pub aud: Vec<String>,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Expires at
    pub exp: i64,

    pub typ: TokenKind,
}

impl Claims {
    /// Build the claim set for a new token.
    ///
    /// `now` is used for both issued-at and not-before.
    ///
    /// # Arguments
    /// * `kind` - Access or refresh
    /// * `subject` - User identifier
    /// * `issuer` - Issuing service
    /// * `audience` - Intended recipients
    /// * `now` - Issuance instant
    /// * `lifetime` - Time until expiry, must be positive
    ///
    /// # Returns
    /// None if the expiry falls outside the representable time range
    pub fn new(
        kind: TokenKind,
        subject: impl Into<String>,
        issuer: impl Into<String>,
        audience: &[String],
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let issued_at = now.timestamp();
        let expires_at = now.checked_add_signed(lifetime)?;

        Some(Self {
            sub: subject.into(),
            iss: issuer.into(),
            aud: audience.to_vec(),
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at.timestamp(),
            typ: kind,
        })
    }

    /// Check the validity window against `now` (Unix seconds).
    ///
    /// # Errors
    /// * `InvalidWindow` - `exp > nbf >= iat` does not hold
    /// * `Expired` - `exp <= now`
    /// * `NotYetValid` - `nbf > now`
    pub fn check_window(&self, now: i64) -> Result<(), Rejection> {
        if !(self.exp > self.nbf && self.nbf >= self.iat) {
            return Err(Rejection::InvalidWindow);
        }

        if self.exp <= now {
            return Err(Rejection::Expired);
        }

        if self.nbf > now {
            return Err(Rejection::NotYetValid);
        }

        Ok(())
    }
}
