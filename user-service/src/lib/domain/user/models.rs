use std::fmt;
use std::str::FromStr;

use auth::ConfigurationError;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::RoleError;

/// User aggregate entity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Stored login material for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new time-ordered user ID.
    ///
    /// # Returns
    /// UserId with UUID v7
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Input limits applied to user-supplied fields.
///
/// Built once from configuration and passed to whoever validates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    password_min_length: usize,
    email_max_length: usize,
}

impl ValidationRules {
    /// # Errors
    /// * `InvalidSetting` - A limit is zero
    pub fn new(
        password_min_length: usize,
        email_max_length: usize,
    ) -> Result<Self, ConfigurationError> {
        if password_min_length == 0 {
            return Err(ConfigurationError::InvalidSetting {
                key: "validation.password_min_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if email_max_length == 0 {
            return Err(ConfigurationError::InvalidSetting {
                key: "validation.email_max_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            password_min_length,
            email_max_length,
        })
    }

    pub fn password_min_length(&self) -> usize {
        self.password_min_length
    }

    pub fn email_max_length(&self) -> usize {
        self.email_max_length
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            email_max_length: 255,
        }
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    /// * `rules` - Length limits
    ///
    /// # Errors
    /// * `Required` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `TooLong` - Email exceeds the configured maximum
    pub fn new(email: String, rules: &ValidationRules) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Required);
        }

        email_address::EmailAddress::from_str(&email).map_err(|_| EmailError::InvalidFormat)?;

        if email.chars().count() > rules.email_max_length() {
            return Err(EmailError::TooLong {
                max: rules.email_max_length(),
            });
        }

        Ok(EmailAddress(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that satisfied the password policy.
///
/// Never printed: `Debug` shows only the length.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Required` - Password is empty
    /// * `TooShort` - Shorter than the configured minimum
    pub fn new(password: String, rules: &ValidationRules) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Required);
        }

        if password.chars().count() < rules.password_min_length() {
            return Err(PasswordPolicyError::TooShort {
                min: rules.password_min_length(),
            });
        }

        Ok(Password(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<{} chars>)", self.0.chars().count())
    }
}

/// Role a user holds in the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Staff,
    Student,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Staff => "staff",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "staff" => Ok(Role::Staff),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

impl CreateUserCommand {
    pub fn new(email: EmailAddress, password: Password, role: Role) -> Self {
        Self {
            email,
            password,
            role,
        }
    }
}

/// Command to log a user in. Only presence is checked; a malformed email
/// simply matches no account.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}
