//! Fallback chain over candidate boundary URLs.
//!
//! Candidates are tried strictly in order. The first one that fetches and
//! parses wins; later candidates are never contacted. When every candidate
//! fails the last error is returned, or [`LoadError::Exhausted`] if the
//! region had no candidates at all.

use tracing::{debug, error, warn};

use super::boundary::BoundaryData;
use super::provider::{BoundaryLoader, BoundarySource, LoadError};
use crate::region::RegionConfig;

pub struct FallbackLoader<S> {
    source: S,
}

impl<S: BoundarySource> FallbackLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn try_candidate(&self, url: &str, name_property: &str) -> Result<BoundaryData, LoadError> {
        let text = self.source.fetch(url)?;
        BoundaryData::parse(&text, name_property).map_err(|message| LoadError::Parse {
            url: url.to_string(),
            message,
        })
    }
}

impl<S: BoundarySource> BoundaryLoader for FallbackLoader<S> {
    fn load(&self, region: &RegionConfig) -> Result<BoundaryData, LoadError> {
        let total = region.sources.len();
        let mut last_error = None;

        for (i, url) in region.sources.iter().enumerate() {
            debug!(region = %region.key, source = self.source.name(), url = %url, "[{}/{}] fetching boundary", i + 1, total);
            match self.try_candidate(url, &region.name_property) {
                Ok(data) => {
                    debug!(region = %region.key, url = %url, features = data.feature_count(), "boundary loaded");
                    return Ok(data);
                }
                Err(e) => {
                    warn!(region = %region.key, url = %url, error = %e, "boundary candidate failed");
                    last_error = Some(e);
                }
            }
        }

        let err = last_error.unwrap_or(LoadError::Exhausted { region: region.key });
        error!(region = %region.key, candidates = total, error = %err, "all boundary candidates failed");
        Err(err)
    }
}
