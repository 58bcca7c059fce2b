//! Inclusion filter deciding which repository files are worth sending to the model.
//!
//! Matching is plain case-insensitive substring containment (which covers suffixes);
//! there are no glob or regex semantics.

use serde::{Deserialize, Serialize};

/// Default byte ceiling for a single file
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500_000;

/// Build output, VCS metadata, dependency folders and binary/media extensions
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    // Version control, dependencies and virtualenvs
    "node_modules/", "venv/", ".git/", "__pycache__/",
    // Build output and IDE metadata
    "target/", "dist/", "build/", ".idea/", ".vscode/",
    // OS metadata and environment files
    ".DS_Store", "Thumbs.db", ".env",
    // Compiled objects, libraries and executables
    ".pyc", ".pyo", ".pyd", ".so", ".dylib", ".dll", ".exe", ".bin", ".dat", ".pb",
    ".o", ".a", ".lib",
    // Images and fonts
    ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2", ".ttf", ".eot",
];

/// Size ceiling and exclusion list applied to every repository entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Files strictly larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Substrings that exclude a path when found anywhere in it
    pub exclude_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl FilterConfig {
    /// Returns `true` if a file with this path and size should be included
    pub fn include(&self, path: &str, size: u64) -> bool {
        size <= self.max_file_size && self.excluded_by(path).is_none()
    }

    /// Returns `true` if a directory should be descended into.
    ///
    /// The path is matched with a trailing `/` so directory patterns such as
    /// `node_modules/` prune the directory itself, not only its children.
    pub fn include_dir(&self, path: &str) -> bool {
        let mut dir = path.trim_end_matches('/').to_string();
        dir.push('/');
        self.excluded_by(&dir).is_none()
    }

    /// Returns the first pattern that excludes `path`, if any
    pub fn excluded_by(&self, path: &str) -> Option<&str> {
        let path = path.to_lowercase();
        self.exclude_patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| path.contains(&pattern.to_lowercase()))
    }
}
