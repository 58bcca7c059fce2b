use crate::completion::{Completion, CompletionClient};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{RepositoryFetcher, RepositorySnapshot};
use crate::github::RepositoryReference;
use crate::prompts::assemble_prompt;
use log::{info, warn};

/// Fetch, assemble and complete: the whole README pipeline for one repository
pub struct ReadmeGenerator {
    fetcher: RepositoryFetcher,
    completion: Box<dyn Completion>,
}

impl ReadmeGenerator {
    /// Creates a generator talking to GitHub and the configured completion endpoint
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_parts(
            RepositoryFetcher::new(config)?,
            Box::new(CompletionClient::new(config)?),
        ))
    }

    /// Creates a generator from explicit collaborators
    pub fn with_parts(fetcher: RepositoryFetcher, completion: Box<dyn Completion>) -> Self {
        Self { fetcher, completion }
    }

    /// Fetches metadata and retained files
    pub async fn fetch(&self, repo: &RepositoryReference) -> Result<RepositorySnapshot> {
        self.fetcher.fetch(repo).await
    }

    /// Generates README text for an already fetched snapshot.
    ///
    /// An empty file set yields an empty string and the completion API is not called.
    pub async fn generate_from(&self, snapshot: &RepositorySnapshot) -> Result<String> {
        if snapshot.files.is_empty() {
            warn!("No suitable files found for analysis");
            return Ok(String::new());
        }

        let prompt = assemble_prompt(&snapshot.files, &snapshot.metadata);
        info!(
            "Assembled prompt from {} files ({} chars)",
            snapshot.files.len(),
            prompt.chars().count()
        );
        self.completion.complete(&prompt).await
    }

    /// Runs the full pipeline for `repo`
    pub async fn generate(&self, repo: &RepositoryReference) -> Result<String> {
        let snapshot = self.fetch(repo).await?;
        self.generate_from(&snapshot).await
    }
}
