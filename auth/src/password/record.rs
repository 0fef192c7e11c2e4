use std::fmt;
use std::str::FromStr;

use argon2::Version;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use thiserror::Error;

/// Algorithm tag written in the first field of every record.
pub const ALGORITHM_TAG: &str = "argon2id";

/// KDF version this codec derives with. Records carrying any other version are rejected.
pub const KDF_VERSION: Version = Version::V0x13;

/// Cost parameters and output sizes used when deriving a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
    /// Salt length in bytes
    pub salt_length: usize,
    /// Derived key length in bytes
    pub key_length: usize,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 2,
            salt_length: 16,
            key_length: 32,
        }
    }
}

/// Decoded form of a stored password hash.
///
/// Textual form: `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt>$<key>`
/// with salt and key in standard base64 without padding. Salt and key lengths
/// are whatever was written at creation time; they are never inferred from
/// the current [`CostParams`].
#[derive(Clone, PartialEq, Eq)]
pub struct HashRecord {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub key: Vec<u8>,
}

/// Why a stored record could not be decoded. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 6 '$'-separated fields, found {0}")]
    FieldCount(usize),

    #[error("unsupported algorithm tag '{0}'")]
    Algorithm(String),

    #[error("unsupported KDF version field '{0}'")]
    Version(String),

    #[error("unparseable cost parameters '{0}'")]
    CostParams(String),

    #[error("salt is not valid base64: {0}")]
    Salt(String),

    #[error("derived key is not valid base64: {0}")]
    Key(String),
}

impl fmt::Display for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_TAG,
            KDF_VERSION as u32,
            self.memory_kib,
            self.iterations,
            self.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.key),
        )
    }
}

// Salt and key stay out of logs and panic messages.
impl fmt::Debug for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRecord")
            .field("memory_kib", &self.memory_kib)
            .field("iterations", &self.iterations)
            .field("parallelism", &self.parallelism)
            .field("salt", &format_args!("<{} bytes>", self.salt.len()))
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .finish()
    }
}

impl FromStr for HashRecord {
    type Err = RecordError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = encoded.split('$').collect();
        let [leading, tag, version, cost, salt, key] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        if !leading.is_empty() {
            return Err(RecordError::FieldCount(fields.len()));
        }

        if *tag != ALGORITHM_TAG {
            return Err(RecordError::Algorithm(tag.to_string()));
        }

        let parsed_version = version.strip_prefix("v=").and_then(parse_decimal);
        if parsed_version != Some(KDF_VERSION as u32) {
            return Err(RecordError::Version(version.to_string()));
        }

        let (memory_kib, iterations, parallelism) =
            parse_cost(cost).ok_or_else(|| RecordError::CostParams(cost.to_string()))?;

        let salt = STANDARD_NO_PAD
            .decode(salt)
            .map_err(|e| RecordError::Salt(e.to_string()))?;

        let key = STANDARD_NO_PAD
            .decode(key)
            .map_err(|e| RecordError::Key(e.to_string()))?;

        Ok(Self {
            memory_kib,
            iterations,
            parallelism,
            salt,
            key,
        })
    }
}

fn parse_cost(segment: &str) -> Option<(u32, u32, u32)> {
    let mut parts = segment.split(',');
    let memory = parse_decimal(parts.next()?.strip_prefix("m=")?)?;
    let iterations = parse_decimal(parts.next()?.strip_prefix("t=")?)?;
    let parallelism = parse_decimal(parts.next()?.strip_prefix("p=")?)?;

    if parts.next().is_some() {
        return None;
    }

    Some((memory, iterations, parallelism))
}

/// Canonical decimal only: ASCII digits, no sign, no leading zero.
fn parse_decimal(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashRecord {
        HashRecord {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 2,
            salt: (0u8..16).collect(),
            key: (100u8..132).collect(),
        }
    }

    #[test]
    fn test_encoded_form_round_trips() {
        let record = sample();
        let encoded = record.to_string();

        assert!(encoded.starts_with("$argon2id$v=19$m=65536,t=3,p=2$"));
        assert_eq!(encoded.split('$').count(), 6);

        let decoded: HashRecord = encoded.parse().expect("Failed to parse record");
        assert_eq!(decoded, record);
        assert_eq!(decoded.salt.len(), 16);
        assert_eq!(decoded.key.len(), 32);
    }

    #[test]
    fn test_segments_contain_no_padding() {
        let encoded = sample().to_string();
        let fields: Vec<&str> = encoded.split('$').collect();

        assert!(!fields[4].contains('='));
        assert!(!fields[5].contains('='));
    }

    #[test]
    fn test_wrong_field_count() {
        let result = "$argon2id$v=19$m=65536,t=3,p=2$c2FsdA".parse::<HashRecord>();
        assert_eq!(result, Err(RecordError::FieldCount(5)));
    }

    #[test]
    fn test_version_mismatch() {
        let encoded = sample().to_string().replace("v=19", "v=16");
        assert!(matches!(
            encoded.parse::<HashRecord>(),
            Err(RecordError::Version(_))
        ));
    }

    #[test]
    fn test_unknown_algorithm_tag() {
        let encoded = sample().to_string().replace("argon2id", "argon2i");
        assert!(matches!(
            encoded.parse::<HashRecord>(),
            Err(RecordError::Algorithm(_))
        ));
    }

    #[test]
    fn test_cost_params_must_be_complete() {
        let encoded = sample().to_string().replace("m=65536,t=3,p=2", "m=65536,t=3");
        assert!(matches!(
            encoded.parse::<HashRecord>(),
            Err(RecordError::CostParams(_))
        ));
    }

    #[test]
    fn test_cost_params_must_be_canonical() {
        for cost in [
            "m=+65536,t=3,p=2",
            "m=065536,t=3,p=2",
            "m=65536,t=03,p=2",
            "m=65536,t=3,p= 2",
            "m=65536,t=3,p=",
        ] {
            let encoded = sample().to_string().replace("m=65536,t=3,p=2", cost);
            assert_eq!(
                encoded.parse::<HashRecord>(),
                Err(RecordError::CostParams(cost.to_string())),
                "{} was accepted",
                cost
            );
        }
    }

    #[test]
    fn test_version_must_be_canonical() {
        for version in ["v=019", "v=+19"] {
            let encoded = sample().to_string().replace("v=19", version);
            assert!(matches!(
                encoded.parse::<HashRecord>(),
                Err(RecordError::Version(_))
            ));
        }
    }

    #[test]
    fn test_invalid_base64_segment() {
        let mut fields: Vec<String> = sample().to_string().split('$').map(String::from).collect();
        fields[4] = "not*base64".to_string();
        let encoded = fields.join("$");

        assert!(matches!(
            encoded.parse::<HashRecord>(),
            Err(RecordError::Salt(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret_material() {
        let debug = format!("{:?}", sample());
        let encoded = sample().to_string();
        let key_segment = encoded.rsplit('$').next().unwrap();

        assert!(debug.contains("<32 bytes>"));
        assert!(!debug.contains(key_segment));
    }
}
