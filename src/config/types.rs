use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub story: StoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(default = "default_temperature")]
    pub temperature: SliderConfig,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: SliderConfig,
}

/// Bounds and starting value of a range control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl SliderConfig {
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.step.is_nan() || self.step <= 0.0 {
            return Err(Error::config(format!(
                "{name}: step must be positive, got {}",
                self.step
            )));
        }
        if !(self.min..=self.max).contains(&self.default) {
            return Err(Error::config(format!(
                "{name}: default {} is outside {}..={}",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::config("api.base_url must not be empty"));
        }
        self.story.temperature.validate("story.temperature")?;
        self.story.max_tokens.validate("story.max_tokens")?;
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_temperature() -> SliderConfig {
    SliderConfig {
        min: 0.1,
        max: 1.0,
        step: 0.1,
        default: 0.7,
    }
}

fn default_max_tokens() -> SliderConfig {
    SliderConfig {
        min: 50.0,
        max: 500.0,
        step: 10.0,
        default: 150.0,
    }
}
