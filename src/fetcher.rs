//! Repository traversal: lists the tree through the contents API, applies the
//! inclusion filter and downloads every retained file.

use crate::config::Config;
use crate::error::{MdtoolError, Result};
use crate::filter::FilterConfig;
use crate::github::{ContentKind, GitHubClient, RepositoryMetadata, RepositoryReference};
use crate::parallel::ParallelProcessor;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Everything the prompt is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    /// Repository metadata
    pub metadata: RepositoryMetadata,
    /// Retained files keyed by repository-relative path, sorted
    pub files: BTreeMap<String, String>,
}

/// Walks a repository tree and collects the files that pass the filter
pub struct RepositoryFetcher {
    client: GitHubClient,
    filter: FilterConfig,
    max_depth: usize,
    downloads: ParallelProcessor,
}

impl RepositoryFetcher {
    /// Creates a fetcher with its own GitHub client
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(GitHubClient::new(config)?, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: GitHubClient, config: &Config) -> Self {
        Self {
            client,
            filter: config.filter.clone(),
            max_depth: config.processing.max_depth,
            downloads: ParallelProcessor::new(config.processing.max_concurrent_downloads),
        }
    }

    /// Fetches metadata and all retained files.
    ///
    /// Fails with [`MdtoolError::EmptyResult`] when no file survives filtering
    /// and decoding. Individual file failures are logged and skipped.
    pub async fn fetch(&self, repo: &RepositoryReference) -> Result<RepositorySnapshot> {
        let metadata = self.client.get_repository(repo).await?;
        info!("Fetched metadata for {}", repo);

        let files = self.collect_files(repo).await?;
        if files.is_empty() {
            return Err(MdtoolError::EmptyResult(format!(
                "no suitable files found in repository {}",
                repo
            )));
        }

        info!("Successfully fetched {} files from {}", files.len(), repo);
        Ok(RepositorySnapshot { metadata, files })
    }

    /// Iterative walk over pending directories, bounded by `max_depth`
    async fn collect_files(&self, repo: &RepositoryReference) -> Result<BTreeMap<String, String>> {
        let mut files = BTreeMap::new();
        let mut pending = vec![(String::new(), 0usize)];

        while let Some((dir, depth)) = pending.pop() {
            let mut entries = match self.client.list_directory(repo, &dir).await {
                Ok(entries) => entries,
                // the root listing is the only one allowed to abort the walk
                Err(e) if dir.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Failed to fetch contents of directory {}: {}", dir, e);
                    continue;
                }
            };
            entries.sort_by(|a, b| a.path.cmp(&b.path));

            let mut wanted = Vec::new();
            for entry in entries {
                match entry.kind {
                    ContentKind::File => {
                        if entry.size > self.filter.max_file_size {
                            warn!(
                                "Skipping file {} ({} bytes exceeds limit)",
                                entry.path, entry.size
                            );
                        } else if let Some(pattern) = self.filter.excluded_by(&entry.path) {
                            info!("Skipping file {} (matches '{}')", entry.path, pattern);
                        } else {
                            wanted.push(entry.path);
                        }
                    }
                    ContentKind::Dir => {
                        if !self.filter.include_dir(&entry.path) {
                            info!("Skipping directory {}", entry.path);
                        } else if depth >= self.max_depth {
                            warn!(
                                "Skipping directory {} (depth limit {})",
                                entry.path, self.max_depth
                            );
                        } else {
                            pending.push((entry.path, depth + 1));
                        }
                    }
                    kind => debug!("Ignoring {:?} entry {}", kind, entry.path),
                }
            }

            for (path, result) in self.download(repo, &wanted).await {
                match result {
                    Ok(content) => {
                        info!("Added file: {}", path);
                        files.insert(path, content);
                    }
                    Err(e) => warn!("Skipping file {}: {}", path, e),
                }
            }
        }

        Ok(files)
    }

    async fn download(
        &self,
        repo: &RepositoryReference,
        paths: &[String],
    ) -> Vec<(String, Result<String>)> {
        let tasks: Vec<_> = paths
            .iter()
            .map(|path| {
                let client = self.client.clone();
                let repo = repo.clone();
                let path = path.clone();
                async move { client.get_file(&repo, &path).await.and_then(|file| file.decode()) }
            })
            .collect();

        paths.iter().cloned().zip(self.downloads.process(tasks).await).collect()
    }
}
