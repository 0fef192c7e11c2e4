use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;
use super::record::CostParams;
use super::record::HashRecord;
use super::record::KDF_VERSION;

/// Password hashing codec.
///
/// Produces and verifies self-describing Argon2id records (see [`HashRecord`]).
/// Holds no mutable state: one instance can be shared across threads and
/// used concurrently without locking.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: CostParams,
    decoy: HashRecord,
}

impl PasswordHasher {
    /// Create a password hasher with the default cost parameters.
    ///
    /// # Returns
    /// PasswordHasher using 64 MiB, 3 iterations, 2 lanes, 16 byte salt, 32 byte key
    pub fn new() -> Self {
        Self::with_params(CostParams::default())
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `params` - Cost parameters used for every new record
    pub fn with_params(params: CostParams) -> Self {
        let decoy = HashRecord {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
            salt: vec![0u8; params.salt_length],
            key: vec![0u8; params.key_length],
        };

        Self { params, decoy }
    }

    /// Cost parameters applied to new records.
    pub fn params(&self) -> &CostParams {
        &self.params
    }

    /// Hash a plaintext password.
    ///
    /// Draws a fresh salt from the operating system RNG, so hashing the same
    /// password twice yields two different records.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded record `$argon2id$v=19$m=..,t=..,p=..$<salt>$<key>`
    ///
    /// # Errors
    /// * `CryptoFailure` - Entropy source failed or cost parameters were rejected
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.params.salt_length];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::CryptoFailure(format!("entropy source: {}", e)))?;

        let mut record = HashRecord {
            memory_kib: self.params.memory_kib,
            iterations: self.params.iterations,
            parallelism: self.params.parallelism,
            salt,
            key: Vec::new(),
        };

        record.key = derive_key(password, &record, self.params.key_length)
            .map_err(|e| PasswordError::CryptoFailure(e.to_string()))?;

        Ok(record.to_string())
    }

    /// Verify a password against a stored record.
    ///
    /// The record's own cost parameters, salt and key length are used, so
    /// records written with older parameters keep verifying after the
    /// defaults change. The derived key is compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Candidate plaintext password
    /// * `hash` - Stored record
    ///
    /// # Errors
    /// * `InvalidCredential` - Wrong password, or the record is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let record: HashRecord = hash.parse().map_err(|e| {
            tracing::warn!(reason = %e, "Rejecting malformed password hash record");
            PasswordError::InvalidCredential
        })?;

        let candidate = derive_key(password, &record, record.key.len()).map_err(|e| {
            tracing::warn!(reason = %e, "Stored cost parameters rejected by KDF");
            PasswordError::InvalidCredential
        })?;

        if bool::from(candidate.ct_eq(&record.key)) {
            Ok(())
        } else {
            tracing::debug!("Password does not match stored record");
            Err(PasswordError::InvalidCredential)
        }
    }

    /// Run one full verification against a record no password matches.
    ///
    /// Login calls this when no record exists for the account, so an unknown
    /// account costs the same KDF work as a wrong password.
    pub fn verify_decoy(&self, password: &str) -> PasswordError {
        match derive_key(password, &self.decoy, self.decoy.key.len()) {
            Ok(candidate) => {
                let _ = candidate.ct_eq(&self.decoy.key);
            }
            Err(e) => tracing::warn!(reason = %e, "Cost parameters rejected by KDF"),
        }

        PasswordError::InvalidCredential
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_key(
    password: &str,
    record: &HashRecord,
    key_length: usize,
) -> Result<Vec<u8>, argon2::Error> {
    let params = Params::new(
        record.memory_kib,
        record.iterations,
        record.parallelism,
        Some(key_length),
    )?;

    let mut key = vec![0u8; key_length];
    Argon2::new(Algorithm::Argon2id, KDF_VERSION, params).hash_password_into(
        password.as_bytes(),
        &record.salt,
        &mut key,
    )?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(CostParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
            salt_length: 16,
            key_length: 32,
        })
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert_eq!(hasher.verify(password, &hash), Ok(()));
        assert_eq!(
            hasher.verify("wrong_password", &hash),
            Err(PasswordError::InvalidCredential)
        );
    }

    #[test]
    fn test_same_password_yields_distinct_records() {
        let hasher = cheap_hasher();

        let first = hasher.hash("repeat").expect("Failed to hash password");
        let second = hasher.hash("repeat").expect("Failed to hash password");

        assert_ne!(first, second);
        assert_eq!(hasher.verify("repeat", &first), Ok(()));
        assert_eq!(hasher.verify("repeat", &second), Ok(()));
    }

    #[test]
    fn test_configured_lengths_are_written() {
        let hasher = PasswordHasher::with_params(CostParams {
            salt_length: 24,
            key_length: 48,
            ..*cheap_hasher().params()
        });

        let hash = hasher.hash("secret").expect("Failed to hash password");
        let record: HashRecord = hash.parse().expect("Failed to parse record");

        assert_eq!(record.salt.len(), 24);
        assert_eq!(record.key.len(), 48);
        assert_eq!(hasher.verify("secret", &hash), Ok(()));
    }

    #[test]
    fn test_verify_uses_stored_parameters() {
        let hash = cheap_hasher().hash("portable").expect("Failed to hash password");

        // A hasher configured with the expensive defaults still verifies old records
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.verify("portable", &hash), Ok(()));
    }

    #[test]
    fn test_any_single_character_corruption_is_rejected() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("tamper-me").expect("Failed to hash password");

        for (index, original) in hash.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut corrupted = hash.clone();
            corrupted.replace_range(index..index + 1, &replacement.to_string());

            assert_eq!(
                hasher.verify("tamper-me", &corrupted),
                Err(PasswordError::InvalidCredential),
                "corruption at index {} was accepted",
                index
            );
        }
    }

    #[test]
    fn test_verify_malformed_records() {
        let hasher = cheap_hasher();

        for malformed in [
            "invalid_hash",
            "",
            "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHRzYWx0$",
            "$argon2id$v=16$m=64,t=1,p=1$c2FsdHNhbHRzYWx0$a2V5a2V5a2V5a2V5",
            "$argon2id$v=19$m=64,t=1,p=1$c2Fs$a2V5a2V5a2V5a2V5",
        ] {
            assert_eq!(
                hasher.verify("password", malformed),
                Err(PasswordError::InvalidCredential)
            );
        }
    }

    #[test]
    fn test_decoy_rejects_every_password() {
        let hasher = cheap_hasher();

        for password in ["", "password123", "tamper-me"] {
            assert_eq!(hasher.verify_decoy(password), PasswordError::InvalidCredential);
        }
    }

    #[test]
    fn test_decoy_uses_configured_costs() {
        let hasher = PasswordHasher::with_params(CostParams {
            salt_length: 24,
            key_length: 48,
            ..*cheap_hasher().params()
        });

        // Same parameters a real record from this hasher carries
        let record: HashRecord = hasher.hash("secret").unwrap().parse().unwrap();
        assert_eq!(hasher.decoy.memory_kib, record.memory_kib);
        assert_eq!(hasher.decoy.iterations, record.iterations);
        assert_eq!(hasher.decoy.parallelism, record.parallelism);
        assert_eq!(hasher.decoy.salt.len(), record.salt.len());
        assert_eq!(hasher.decoy.key.len(), record.key.len());
    }

    #[test]
    fn test_salt_too_short_fails_hashing() {
        let hasher = PasswordHasher::with_params(CostParams {
            salt_length: 4,
            ..*cheap_hasher().params()
        });

        assert!(matches!(
            hasher.hash("password"),
            Err(PasswordError::CryptoFailure(_))
        ));
    }

    #[test]
    fn test_default_parameters_scenario() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("correct-horse").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$v=19$m=65536,t=3,p=2$"));
        assert_eq!(hasher.verify("correct-horse", &hash), Ok(()));
        assert_eq!(
            hasher.verify("wrong-horse", &hash),
            Err(PasswordError::InvalidCredential)
        );
    }
}
