//! Minimal GitHub REST client: repository metadata and the contents API.

use crate::config::Config;
use crate::error::{MdtoolError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

const GITHUB_URL_PREFIXES: &[&str] = &["https://github.com/", "http://github.com/", "github.com/"];

/// An `owner/name` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    /// User or organization owning the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryReference {
    /// Parses `owner/repo`, also accepting a `https://github.com/owner/repo` URL
    pub fn parse(input: &str) -> Result<Self> {
        let mut spec = input.trim();
        if let Some(rest) = GITHUB_URL_PREFIXES.iter().find_map(|p| spec.strip_prefix(p)) {
            spec = rest.trim_end_matches('/');
            spec = spec.strip_suffix(".git").unwrap_or(spec);
        }

        match spec.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(MdtoolError::Validation(format!(
                "invalid repository name format '{}'. Use 'owner/repo'",
                input.trim()
            ))),
        }
    }
}

impl FromStr for RepositoryReference {
    type Err = MdtoolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Snapshot of the repository fields used in the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Primary language as detected by GitHub
    pub language: Option<String>,
    /// License name; `None` when the repository has no detected license
    pub license: Option<String>,
    /// Stargazer count
    pub stars: u64,
    /// Fork count
    pub forks: u64,
    /// Open issue count
    pub open_issues: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    name: String,
    description: Option<String>,
    language: Option<String>,
    license: Option<LicenseResponse>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    name: Option<String>,
}

impl From<RepositoryResponse> for RepositoryMetadata {
    fn from(repo: RepositoryResponse) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            language: repo.language,
            license: repo.license.and_then(|license| license.name),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
        }
    }
}

/// Kind of an entry returned by the contents API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symbolic link
    Symlink,
    /// Git submodule
    Submodule,
    /// Anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Repository-relative path
    pub path: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Size in bytes as reported by GitHub (0 for directories)
    #[serde(default)]
    pub size: u64,
}

/// A single file as returned by the contents API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileContent {
    /// Repository-relative path
    pub path: String,
    /// Transport encoding, `base64` for regular files
    pub encoding: Option<String>,
    /// Encoded content
    pub content: Option<String>,
}

impl FileContent {
    /// Decodes the transport encoding into UTF-8 text
    pub fn decode(&self) -> Result<String> {
        match self.encoding.as_deref() {
            Some("base64") => {}
            other => {
                return Err(MdtoolError::Decode(format!(
                    "{}: unsupported encoding {}",
                    self.path,
                    other.unwrap_or("<none>")
                )))
            }
        }

        // GitHub wraps the payload at 60 columns
        let encoded: String = self
            .content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| MdtoolError::Decode(format!("{}: {}", self.path, e)))?;

        String::from_utf8(bytes)
            .map_err(|_| MdtoolError::Decode(format!("{}: content is not valid UTF-8", self.path)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

/// Read-only client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base: Url,
}

impl GitHubClient {
    /// Creates a client from the configured base URL, token and timeout
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.github_api_base).map_err(|e| {
            MdtoolError::Config(format!(
                "invalid GitHub API base '{}': {}",
                config.github_api_base, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("mdtool"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = config.github_token() {
            let auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| {
                    MdtoolError::Config("GitHub token contains invalid characters".into())
                })?;
            headers.insert(AUTHORIZATION, auth);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| MdtoolError::Network(e.to_string()))?;

        Ok(Self { client, base })
    }

    /// Fetches the repository metadata snapshot
    pub async fn get_repository(&self, repo: &RepositoryReference) -> Result<RepositoryMetadata> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.name])?;
        let what = format!("repository {}", repo);
        let response: RepositoryResponse = self.get_json(url, &what).await?;
        Ok(response.into())
    }

    /// Lists a directory; `""` is the repository root
    pub async fn list_directory(
        &self,
        repo: &RepositoryReference,
        path: &str,
    ) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(repo, path)?;
        let what = format!("contents of {}/{}", repo, path);
        match self.get_json::<ContentsResponse>(url, &what).await? {
            ContentsResponse::Listing(entries) => Ok(entries),
            ContentsResponse::Single(entry) => Ok(vec![entry]),
        }
    }

    /// Fetches one file including its encoded content
    pub async fn get_file(&self, repo: &RepositoryReference, path: &str) -> Result<FileContent> {
        let url = self.contents_url(repo, path)?;
        self.get_json(url, &format!("file {}/{}", repo, path)).await
    }

    fn contents_url(&self, repo: &RepositoryReference, path: &str) -> Result<Url> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        let path = path.trim_matches('/');
        if path.is_empty() {
            segments.push("");
        } else {
            segments.extend(path.split('/'));
        }
        self.endpoint(&segments)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MdtoolError::Config(format!("GitHub API base '{}' cannot be a base URL", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MdtoolError::Network(format!("failed to get {}: {}", what, e)))?;

        let status = response.status();
        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .map_or(false, |remaining| remaining == "0");
        let body = response
            .text()
            .await
            .map_err(|e| MdtoolError::Network(format!("failed to read {}: {}", what, e)))?;

        if status == StatusCode::NOT_FOUND {
            return Err(MdtoolError::NotFound(what.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN && rate_limited)
        {
            return Err(MdtoolError::RateLimitExceeded(format!("while fetching {}", what)));
        }
        if !status.is_success() {
            return Err(MdtoolError::GitHubApi {
                status: status.as_u16(),
                message: format!("failed to get {}: {}", what, body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
