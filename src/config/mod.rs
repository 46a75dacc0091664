mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`), then applies
/// the `API_BASE_URL` override.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await?,
        Err(_) => load_optional(DEFAULT_CONFIG_PATH).await?,
    };

    if let Ok(base_url) = env::var("API_BASE_URL") {
        debug!("Overriding api.base_url from environment: {}", base_url);
        config.api.base_url = base_url;
    }

    config.validate()?;
    Ok(config)
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Like [`load_from`], but a missing file yields the built-in defaults.
pub async fn load_optional(path: impl AsRef<Path>) -> Result<Config> {
    match load_from(path.as_ref()).await {
        Err(crate::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Config::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.logs.level, "info");
        assert_eq!(config.story.temperature.default, 0.7);
        assert_eq!(config.story.max_tokens.min, 50.0);
        assert_eq!(config.story.max_tokens.max, 500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("api:\n  base_url: http://example.test\n").unwrap();
        assert_eq!(config.api.base_url, "http://example.test");
        assert_eq!(config.story.max_tokens.default, 150.0);
    }

    #[test]
    fn test_slider_default_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.story.temperature.default = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("story.temperature"));
    }

    #[test]
    fn test_zero_step_is_rejected() {
        let mut config = Config::default();
        config.story.max_tokens.step = 0.0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_optional(dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from(dir.path().join("absent.yaml")).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
