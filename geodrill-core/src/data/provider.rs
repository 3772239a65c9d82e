//! Boundary source and loader traits, and structured load errors.
//!
//! `BoundarySource` abstracts over where boundary documents come from (HTTP,
//! in-memory fixtures for tests). `BoundaryLoader` is what the drilldown
//! controller talks to: give it a region, get parsed boundary data back.

use thiserror::Error;

use crate::region::{RegionConfig, RegionKey};

use super::boundary::BoundaryData;

/// Structured error types for boundary loading.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("unreadable boundary data from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("failed to fetch boundary data for '{region}'")]
    Exhausted { region: RegionKey },
}

impl LoadError {
    /// Short category label for error history displays.
    pub fn category(&self) -> &'static str {
        match self {
            LoadError::Status { .. } | LoadError::Network { .. } => "network",
            LoadError::Parse { .. } => "data",
            LoadError::Exhausted { .. } => "other",
        }
    }

    /// URL the error came from, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            LoadError::Status { url, .. }
            | LoadError::Network { url, .. }
            | LoadError::Parse { url, .. } => Some(url),
            LoadError::Exhausted { .. } => None,
        }
    }
}

/// Fetches the raw text of a boundary document.
pub trait BoundarySource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch(&self, url: &str) -> Result<String, LoadError>;
}

/// Produces parsed boundary data for a region.
pub trait BoundaryLoader {
    fn load(&self, region: &RegionConfig) -> Result<BoundaryData, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_url() {
        let err = LoadError::Status {
            url: "https://a.test/x.json".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 from https://a.test/x.json");
        assert_eq!(err.category(), "network");
        assert_eq!(err.url(), Some("https://a.test/x.json"));
    }

    #[test]
    fn exhausted_has_no_url() {
        let err = LoadError::Exhausted {
            region: RegionKey::India,
        };
        assert_eq!(err.to_string(), "failed to fetch boundary data for 'india'");
        assert!(err.url().is_none());
    }
}
