#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! mdtool - README generation for GitHub repositories
//!
//! The pipeline runs once per invocation: fetch repository metadata and the
//! file tree, keep the files that pass the inclusion filter, assemble a bounded
//! prompt from file previews, and ask an OpenAI-compatible chat completion API
//! to write the README.
//!
//! ## Usage
//! ```rust,ignore
//! use mdtool::{Config, ReadmeGenerator, RepositoryReference};
//!
//! async fn example() -> mdtool::Result<()> {
//!     let config = Config::load(None)?;
//!     let repo = RepositoryReference::parse("octocat/Hello-World")?;
//!     let readme = ReadmeGenerator::new(&config)?.generate(&repo).await?;
//!     println!("{}", readme);
//!     Ok(())
//! }
//! ```

/// Command-line definitions and status printers
pub mod cli;
/// Chat completion client
pub mod completion;
/// Configuration module for the application
pub mod config;
/// Error handling types and utilities
pub mod error;
/// Repository traversal
pub mod fetcher;
/// File inclusion rules
pub mod filter;
/// README generation pipeline
pub mod generator;
/// GitHub REST client and repository types
pub mod github;
/// Logging configuration and utilities
pub mod logging;
/// Printing and saving results
pub mod output;
/// Bounded-concurrency task execution
pub mod parallel;
/// Prompt templates and assembly
pub mod prompts;

// Re-export common types
pub use completion::{Completion, CompletionClient};
pub use config::Config;
pub use error::{MdtoolError, Result};
pub use fetcher::{RepositoryFetcher, RepositorySnapshot};
pub use filter::FilterConfig;
pub use generator::ReadmeGenerator;
pub use github::{GitHubClient, RepositoryMetadata, RepositoryReference};
pub use output::OutputFormat;
