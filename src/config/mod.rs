mod env_manager;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{MdtoolError, Result};
use crate::filter::FilterConfig;

pub use env_manager::{get_env_value, ApiKeys};

/// Model used when neither the config file nor `GROQ_MODEL` names one
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
/// Public GitHub REST API
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
/// OpenAI-compatible chat completions endpoint
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Main configuration struct for the application
///
/// Built once in `main` and handed down by reference; nothing below the
/// binary reads the process environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion API key, empty when not configured
    pub groq_api_key: String,
    /// GitHub API token for authenticated requests
    pub github_token: Option<String>,
    /// Completion model identifier
    pub default_model: String,
    /// Base URL of the GitHub REST API
    pub github_api_base: String,
    /// Completion request settings
    pub completion: CompletionSettings,
    /// Which repository files are eligible for the prompt
    pub filter: FilterConfig,
    /// Traversal limits
    pub processing: ProcessingConfig,
}

/// Settings for the chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Chat completions endpoint
    pub endpoint: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

/// Limits applied while walking the repository tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Maximum number of file downloads in flight at once
    pub max_concurrent_downloads: usize,
    /// Deepest directory level visited; 0 lists only the repository root
    pub max_depth: usize,
    /// Timeout for each GitHub request in seconds
    pub request_timeout_secs: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 4,
            max_depth: 32,
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: String::new(),
            github_token: None,
            default_model: DEFAULT_MODEL.to_string(),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            completion: CompletionSettings::default(),
            filter: FilterConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration file, then overlays the process environment
    ///
    /// An explicit `path` must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_api_keys(ApiKeys::from_env());
        Ok(config)
    }

    /// Default config file location, `<config dir>/mdtool/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mdtool").join("config.toml"))
    }

    /// Parses a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MdtoolError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            MdtoolError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Overlays values found in the environment on top of the current ones
    pub fn apply_api_keys(&mut self, keys: ApiKeys) {
        if let Some(key) = keys.groq_api_key {
            self.groq_api_key = key;
        }
        if let Some(token) = keys.github_token {
            self.github_token = Some(token);
        }
        if let Some(model) = keys.model {
            self.default_model = model;
        }
        if let Some(base) = keys.github_api_base {
            self.github_api_base = base;
        }
        if let Some(endpoint) = keys.completion_endpoint {
            self.completion.endpoint = endpoint;
        }
    }

    /// Checks the limits are usable; credentials are checked by their consumers
    pub fn validate(&self) -> Result<()> {
        if self.processing.max_concurrent_downloads == 0 {
            return Err(MdtoolError::Config("max_concurrent_downloads must be at least 1".into()));
        }
        if self.processing.request_timeout_secs == 0 || self.completion.timeout_secs == 0 {
            return Err(MdtoolError::Config("timeouts must be at least one second".into()));
        }
        if self.default_model.trim().is_empty() {
            return Err(MdtoolError::Config("model name is empty".into()));
        }
        Ok(())
    }

    /// Retrieves the GitHub token, ignoring blank values
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    /// Timeout applied to every GitHub request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.processing.request_timeout_secs)
    }

    /// Timeout applied to the completion request
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert_eq!(config.filter.max_file_size, 500_000);
        assert_eq!(config.completion.max_tokens, 2000);
        assert!(config.github_token().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "default_model = \"llama-3.1-8b-instant\"\n\n[processing]\nmax_depth = 0\n",
        )?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.default_model, "llama-3.1-8b-instant");
        assert_eq!(config.processing.max_depth, 0);
        assert_eq!(config.processing.max_concurrent_downloads, 4);
        assert_eq!(config.completion.endpoint, DEFAULT_COMPLETION_ENDPOINT);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let result = Config::load(Some(Path::new("/nonexistent/mdtool.toml")));
        assert!(matches!(result, Err(MdtoolError::Config(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::default();
        config.apply_api_keys(ApiKeys {
            groq_api_key: Some("gsk_env".into()),
            github_token: Some("ghp_env".into()),
            github_api_base: Some("http://127.0.0.1:9000".into()),
            ..ApiKeys::default()
        });

        assert_eq!(config.groq_api_key, "gsk_env");
        assert_eq!(config.github_token(), Some("ghp_env"));
        assert_eq!(config.github_api_base, "http://127.0.0.1:9000");
        assert_eq!(config.default_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let mut config = Config::default();
        config.processing.max_concurrent_downloads = 0;
        assert!(matches!(config.validate(), Err(MdtoolError::Config(_))));
    }
}
