// Configuration: the only setting is the Gemini API key. It comes from the
// process environment, optionally seeded from a `.env` file in the working
// directory.

use crate::error::ConfigurationError;
use tracing::debug;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
}

// Hand-written so the key never ends up in logs or panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").field("api_key", &"<redacted>").finish()
    }
}

impl Config {
    /// Load `.env` (if any) and read the key from the environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) => debug!(error = %e, "no .env loaded"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigurationError::MissingApiKey)?;
        Ok(Config { api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingApiKey);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(|_| Some("   ".into())).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingApiKey);
    }

    #[test]
    fn key_is_read_from_the_named_variable() {
        let cfg = Config::from_lookup(|name| {
            (name == API_KEY_VAR).then(|| " abc123\n".to_string())
        })
        .unwrap();
        assert_eq!(cfg.api_key, "abc123");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = Config {
            api_key: "secret".into(),
        };
        assert!(!format!("{:?}", cfg).contains("secret"));
    }
}
