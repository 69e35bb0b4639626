// Configuration for the marketplace gateway, loaded from the environment.

use thiserror::Error;

pub const BASE_URL_VAR: &str = "TRANSFER_API_BASE_URL";
pub const API_KEY_VAR: &str = "TRANSFER_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}

/// Base endpoint and credential for the gateway. Both are mandatory; their
/// absence is a startup failure raised before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    /// Normalized to end in exactly one slash.
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue(BASE_URL_VAR));
        }
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyValue(API_KEY_VAR));
        }

        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        Ok(Self { base_url, api_key })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_err(|_| ConfigError::MissingVariable(BASE_URL_VAR))?;
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVariable(API_KEY_VAR))?;
        Self::new(base_url, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://api.example.com/v2" ; "no trailing slash")]
    #[test_case("https://api.example.com/v2/" ; "one trailing slash")]
    #[test_case("https://api.example.com/v2///" ; "several trailing slashes")]
    fn base_url_ends_in_exactly_one_slash(raw: &str) {
        let config = Config::new(raw, "key").unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v2/");
    }

    #[test]
    fn rejects_empty_values() {
        assert!(matches!(
            Config::new("", "key"),
            Err(ConfigError::EmptyValue(BASE_URL_VAR))
        ));
        assert!(matches!(
            Config::new("https://api.example.com", "   "),
            Err(ConfigError::EmptyValue(API_KEY_VAR))
        ));
    }

    #[test]
    fn from_env_requires_both_variables() {
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVariable(BASE_URL_VAR))
        ));

        std::env::set_var(BASE_URL_VAR, "https://api.example.com/v2");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVariable(API_KEY_VAR))
        ));

        std::env::set_var(API_KEY_VAR, "secret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "secret");

        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(API_KEY_VAR);
    }
}
