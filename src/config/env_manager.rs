use serde::{Serialize, Deserialize};

/// Environment variable holding the completion API key
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
/// Environment variable holding the GitHub access token
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable overriding the completion model
pub const GROQ_MODEL: &str = "GROQ_MODEL";
/// Environment variable overriding the GitHub API base URL
pub const GITHUB_API_BASE_URL: &str = "GITHUB_API_BASE_URL";
/// Environment variable overriding the completion endpoint
pub const GROQ_API_URL: &str = "GROQ_API_URL";

/// Values sourced from the process environment
///
/// Absence is not validated here; the completion client checks for an empty
/// API key and the GitHub client simply goes unauthenticated without a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Completion API key
    pub groq_api_key: Option<String>,
    /// GitHub API token for authenticated requests
    pub github_token: Option<String>,
    /// Model name override
    pub model: Option<String>,
    /// GitHub API base URL override
    pub github_api_base: Option<String>,
    /// Completion endpoint override
    pub completion_endpoint: Option<String>,
}

impl ApiKeys {
    /// Reads all known variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(get_env_value)
    }

    /// Reads all known variables through `lookup`, treating empty values as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            groq_api_key: get(GROQ_API_KEY),
            github_token: get(GITHUB_TOKEN),
            model: get(GROQ_MODEL),
            github_api_base: get(GITHUB_API_BASE_URL),
            completion_endpoint: get(GROQ_API_URL),
        }
    }
}

/// Returns the value of an environment variable, or `None` if unset or empty
pub fn get_env_value(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
