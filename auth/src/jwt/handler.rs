use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::errors::Rejection;
use crate::secret::SigningSecret;

/// Issues and verifies HS256 session tokens.
///
/// Holds only keys derived from the process-wide secret, so verification is
/// a pure function of the token and the current time and can run from any
/// number of tasks at once.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl JwtHandler {
    /// Create a new token handler.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    /// * `issuer` - Value written to and required in the `iss` claim
    pub fn new(secret: &SigningSecret, issuer: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time window, audience and issuer are checked in `verify_at`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a signed token valid from now for `lifetime`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Lifetime is not positive, or expiry is out of range
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        audience: &[String],
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(kind, subject, audience, lifetime, Utc::now())
    }

    /// Issue a signed token as if the current time were `now`.
    pub fn issue_at(
        &self,
        kind: TokenKind,
        subject: &str,
        audience: &[String],
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        if lifetime <= Duration::zero() {
            return Err(JwtError::InvalidLifetime);
        }

        let claims = Claims::new(kind, subject, self.issuer.as_str(), audience, now, lifetime)
            .ok_or(JwtError::InvalidLifetime)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `Unauthenticated` - Bad signature, malformed token, unexpected claim
    ///   shape, foreign issuer, or outside its validity window
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.check(token, now).map_err(|rejection| {
            tracing::debug!(reason = %rejection, "Rejecting token");
            JwtError::Unauthenticated(rejection)
        })
    }

    /// Verify a token and require a specific kind.
    ///
    /// # Errors
    /// * `Unauthenticated` - As [`JwtHandler::verify`], or the kind differs
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = self.verify(token)?;

        if claims.typ != expected {
            let rejection = Rejection::Kind {
                expected,
                found: claims.typ,
            };
            tracing::debug!(reason = %rejection, "Rejecting token");
            return Err(JwtError::Unauthenticated(rejection));
        }

        Ok(claims)
    }

    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Rejection> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => Rejection::Signature,
                _ => Rejection::Malformed(e.to_string()),
            }
        })?;
        let claims = data.claims;

        if claims.iss != self.issuer {
            return Err(Rejection::Issuer(claims.iss));
        }

        claims.check_window(now.timestamp())?;

        Ok(claims)
    }
}
