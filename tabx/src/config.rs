use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use extract::constants::{
    DEFAULT_MODEL_MAX_TOKENS, DEFAULT_OPENAI_MODEL, DEFAULT_RESERVED_RESPONSE_TOKENS,
};

/// TOML config, overridden by environment variables. Below is an example
/// config with all the defaults:
///
/// ```toml
/// model = "gpt-4o-mini"
/// model_max_tokens = 128000
/// reserved_response_tokens = 2000
/// # api_key = "sk-proj-..."  # or set OPENAI_API_KEY
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Completion model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Context window of the model, in tokens.
    #[serde(default = "default_model_max_tokens")]
    pub model_max_tokens: usize,

    /// Tokens reserved for the model's response.
    #[serde(default = "default_reserved_response_tokens")]
    pub reserved_response_tokens: usize,

    /// API key for the completion capability.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Io` - If the file cannot be read.
    /// * `ConfigError::Parse` - If TOML parsing fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overwrite config from environment variables (higher priority).
    ///
    /// # Errors
    ///
    /// * `ConfigError::ParseField` - If parsing a numeric field fails.
    pub fn read_env(&mut self) -> Result<(), ConfigError> {
        self.model.replace_with_env("OPENAI_MODEL");
        self.api_key.replace_with_env("OPENAI_API_KEY");

        if let Ok(max_tokens) = env::var("OPENAI_MODEL_MAX_TOKENS") {
            self.model_max_tokens = max_tokens.parse()?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            model_max_tokens: default_model_max_tokens(),
            reserved_response_tokens: default_reserved_response_tokens(),
            api_key: None,
        }
    }
}

/// Errors reading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse value: {0}")]
    ParseField(#[from] ParseIntError),
}

fn default_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_model_max_tokens() -> usize {
    DEFAULT_MODEL_MAX_TOKENS
}

fn default_reserved_response_tokens() -> usize {
    DEFAULT_RESERVED_RESPONSE_TOKENS
}

/// An extension trait for strings to be updated with a value from the
/// environment.
trait OverwriteFromEnv {
    fn replace_with_env(&mut self, var: &str);
}

impl OverwriteFromEnv for String {
    fn replace_with_env(&mut self, var: &str) {
        if let Ok(env_var) = env::var(var) {
            *self = env_var;
        }
    }
}

impl OverwriteFromEnv for Option<String> {
    fn replace_with_env(&mut self, var: &str) {
        if let Ok(env_var) = env::var(var) {
            *self = Some(env_var);
        }
    }
}

/// An error that represents a failure to read the base user directory.
#[derive(Debug, Error)]
#[error("Failed to read base directory.")]
pub struct BaseDirError;

/// Get the config directory for the application (`~/.config/tabx`).
///
/// # Errors
///
/// A `BaseDirError` if the user's home directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf, BaseDirError> {
    let base_dir = directories::UserDirs::new().ok_or(BaseDirError)?;
    Ok(base_dir.home_dir().join(".config").join("tabx"))
}
