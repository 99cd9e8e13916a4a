//! Batch input: the ordered list of URLs for one run
//!
//! URLs come from a single command-line argument or from a text file with
//! one URL per line. Blank lines and `#` comments are skipped. Duplicates are
//! kept; each occurrence gets its own output row.

use crate::ScoutError;
use std::path::Path;

/// The ordered sequence of URLs to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    urls: Vec<String>,
}

impl BatchRequest {
    /// A batch holding one URL
    pub fn single(url: impl Into<String>) -> Result<Self, ScoutError> {
        Self::from_urls(vec![url.into().trim().to_string()])
    }

    /// Builds a batch from already-cleaned URLs
    pub fn from_urls(urls: Vec<String>) -> Result<Self, ScoutError> {
        let urls: Vec<String> = urls.into_iter().filter(|url| !url.is_empty()).collect();
        if urls.is_empty() {
            return Err(ScoutError::Usage("No URLs to process".to_string()));
        }
        Ok(Self { urls })
    }

    /// Parses file content: trims lines, drops blanks and `#` comments
    pub fn from_lines(content: &str) -> Result<Self, ScoutError> {
        let urls = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self::from_urls(urls)
    }

    /// Reads a URL list file
    pub fn from_file(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScoutError::Input {
            path: path.display().to_string(),
            source,
        })?;
        let batch = Self::from_lines(&content)?;
        tracing::info!("Read {} URL(s) from {}", batch.len(), path.display());
        Ok(batch)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}
