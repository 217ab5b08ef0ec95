//! Client configuration: struct defaults overridden by `TRELLO_*` variables.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CREDENTIAL_KEYS: [&str; 2] = ["key", "token"];

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. Environment variables with TRELLO_ prefix
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API root, including the version segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application key. Required; there is no compiled-in default.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub key: String,

    /// User token. Public resources can be read with a key alone.
    #[serde(default, deserialize_with = "deserialize_optional_credential")]
    pub token: Option<String>,

    /// Per-request timeout for the default transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Any scalar a provider may have typed a credential as, read back as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Flag(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

fn deserialize_optional_credential<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ClientConfig {
    /// Configuration for a key/token pair against the public API.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Load configuration from defaults and `TRELLO_*` environment variables.
    ///
    /// `TRELLO_KEY` and `TRELLO_TOKEN` are taken verbatim, so an all-digit
    /// credential keeps its leading zeros.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be extracted or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("TRELLO_").ignore(&CREDENTIAL_KEYS));
        for name in CREDENTIAL_KEYS {
            let value = Env::var(&format!("TRELLO_{name}")).filter(|v| !v.is_empty());
            if let Some(value) = value {
                figment = figment.merge(Serialized::default(name, value));
            }
        }
        let config: Self = figment.extract()?;

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::Validation(
                "key is required. Set the TRELLO_KEY environment variable.".into(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: '{}'",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs cannot be 0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.trello.com/1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.key.is_empty());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = ClientConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("TRELLO_KEY")));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let mut config = ClientConfig::new("key", "token");
        config.base_url = "api.trello.com/1".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = ClientConfig::new("key", "token");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("TRELLO_KEY", "appkey");
            jail.set_env("TRELLO_TOKEN", "usertoken");
            jail.set_env("TRELLO_BASE_URL", "http://localhost:3000/1");
            jail.set_env("TRELLO_TIMEOUT_SECS", "5");

            let config = ClientConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.key, "appkey");
            assert_eq!(config.token.as_deref(), Some("usertoken"));
            assert_eq!(config.base_url, "http://localhost:3000/1");
            assert_eq!(config.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_numeric_and_bool_credentials_load_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("TRELLO_KEY", "0123");
            jail.set_env("TRELLO_TOKEN", "1234");
            let config = ClientConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.key, "0123");
            assert_eq!(config.token.as_deref(), Some("1234"));

            jail.set_env("TRELLO_KEY", "12345678901234567890123456789012");
            jail.set_env("TRELLO_TOKEN", "true");
            let config = ClientConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.key, "12345678901234567890123456789012");
            assert_eq!(config.token.as_deref(), Some("true"));
            Ok(())
        });
    }

    #[test]
    fn test_typed_credentials_deserialize_as_text() {
        let config: ClientConfig = Figment::new()
            .merge(Serialized::default("key", 1234))
            .merge(Serialized::default("token", true))
            .extract()
            .unwrap();
        assert_eq!(config.key, "1234");
        assert_eq!(config.token.as_deref(), Some("true"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config: ClientConfig = Figment::new()
            .merge(Serialized::default("key", "appkey"))
            .merge(Serialized::default("token", -7))
            .extract()
            .unwrap();
        assert_eq!(config.token.as_deref(), Some("-7"));
    }

    #[test]
    fn test_load_without_key_fails() {
        Jail::expect_with(|_jail| {
            assert!(ClientConfig::load().is_err());
            Ok(())
        });
    }
}
