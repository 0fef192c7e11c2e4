use std::env;

use auth::ConfigurationError;
use auth::CostParams;
use auth::SigningSecret;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::ValidationRules;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt_length: usize,
    pub key_length: usize,
    /// Upper bound on password hash/verify jobs running at once
    pub max_concurrent: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationConfig {
    pub password_min_length: usize,
    pub email_max_length: usize,
}

fn default_issuer() -> String {
    TokenSettings::default().issuer
}

fn default_access_ttl_minutes() -> i64 {
    30
}

fn default_refresh_ttl_days() -> i64 {
    30
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl JwtConfig {
    /// Signing secret, required before any token can be issued or verified.
    ///
    /// # Errors
    /// * `MissingSecret` / `EmptySecret` - `JWT__SECRET` absent or blank
    pub fn signing_secret(&self) -> Result<SigningSecret, ConfigurationError> {
        SigningSecret::from_setting(self.secret.clone(), "JWT__SECRET")
    }

    /// # Errors
    /// * `InvalidSetting` - A token lifetime is zero, negative or too large to represent
    pub fn token_settings(&self) -> Result<TokenSettings, ConfigurationError> {
        let access_lifetime = lifetime(
            "jwt.access_ttl_minutes",
            self.access_ttl_minutes,
            chrono::Duration::try_minutes,
        )?;
        let refresh_lifetime = lifetime(
            "jwt.refresh_ttl_days",
            self.refresh_ttl_days,
            chrono::Duration::try_days,
        )?;

        Ok(TokenSettings {
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            access_lifetime,
            refresh_lifetime,
        })
    }
}

fn lifetime(
    key: &str,
    value: i64,
    to_duration: fn(i64) -> Option<chrono::Duration>,
) -> Result<chrono::Duration, ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if value <= 0 {
        return Err(invalid("must be positive"));
    }
    to_duration(value).ok_or_else(|| invalid("is too large"))
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let params = CostParams::default();
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
            salt_length: params.salt_length,
            key_length: params.key_length,
            max_concurrent: 4,
        }
    }
}

impl PasswordConfig {
    pub fn cost_params(&self) -> CostParams {
        CostParams {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
            salt_length: self.salt_length,
            key_length: self.key_length,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            password_min_length: rules.password_min_length(),
            email_max_length: rules.email_max_length(),
        }
    }
}

impl ValidationConfig {
    /// # Errors
    /// * `InvalidSetting` - Limits are zero or contradictory
    pub fn rules(&self) -> Result<ValidationRules, ConfigurationError> {
        ValidationRules::new(self.password_min_length, self.email_max_length)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__AUDIENCE=svc-a,svc-b overrides jwt.audience
            .add_source(
                Environment::with_prefix("")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("jwt.audience")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
