//! HTTP boundary source.
//!
//! Plain GET with a fixed timeout and `Cache-Control: no-store`. Any non-2xx
//! status is an error so the fallback chain can move on to the next mirror.

use std::time::Duration;

use reqwest::header::CACHE_CONTROL;

use super::provider::{BoundarySource, LoadError};
use crate::config::HttpConfig;

pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl BoundarySource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| LoadError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().map_err(|e| LoadError::Network {
            url: url.to_string(),
            message: format!("reading body: {e}"),
        })
    }
}
