//! Robots.txt handling module
//!
//! This module provides the robots-permission capability consumed by the
//! politeness gate: fetching, parsing, and caching robots.txt per origin.

mod cache;
mod parser;

pub use cache::CachedRobots;
pub use parser::ParsedRobots;

use crate::url::NormalizedUrl;
use crate::RobotsError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Answers whether a URL may be crawled
///
/// Implementations report lookup failures as errors; deciding what a failure
/// means is the politeness gate's job.
#[async_trait]
pub trait RobotsPolicy: Send + Sync {
    async fn is_allowed(&self, url: &NormalizedUrl) -> Result<bool, RobotsError>;
}

/// Policy that allows every URL
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl RobotsPolicy for AllowAll {
    async fn is_allowed(&self, _url: &NormalizedUrl) -> Result<bool, RobotsError> {
        Ok(true)
    }
}

/// Robots policy backed by each origin's `/robots.txt`
///
/// Rules are fetched once per origin and cached until stale. Lookup failures
/// are not cached, so a transient error is retried on the next URL.
pub struct HttpRobots {
    client: Client,
    user_agent: String,
    cache: Mutex<HashMap<String, CachedRobots>>,
}

impl HttpRobots {
    /// Creates a robots policy
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client used for robots.txt requests
    /// * `user_agent` - The product token matched against `User-agent` groups
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the rules for an origin, fetching if necessary
    async fn rules_for(&self, origin: &str) -> Result<ParsedRobots, RobotsError> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(origin) {
                if !cached.is_stale() {
                    tracing::trace!("Using cached robots.txt for {}", origin);
                    return Ok(cached.content.clone());
                }
            }
        }

        let robots = fetch_robots(&self.client, origin).await?;
        if let Some(delay) = robots.crawl_delay(&self.user_agent) {
            tracing::debug!("{} requests Crawl-delay: {}s", origin, delay);
        }

        let mut cache = self.cache.lock().await;
        cache.insert(origin.to_string(), CachedRobots::new(robots.clone()));
        Ok(robots)
    }
}

#[async_trait]
impl RobotsPolicy for HttpRobots {
    async fn is_allowed(&self, url: &NormalizedUrl) -> Result<bool, RobotsError> {
        let origin = url
            .origin()
            .ok_or_else(|| RobotsError::Unavailable(format!("no origin for {}", url)))?;
        let robots = self.rules_for(&origin).await?;
        Ok(robots.is_allowed(url.as_str(), &self.user_agent))
    }
}

/// Fetches robots.txt for an origin
///
/// | Response | Result |
/// |----------|--------|
/// | 2xx | Parsed rules |
/// | 4xx | Allow all (no robots.txt) |
/// | 5xx | `RobotsError::Status` |
/// | Network error | `RobotsError::Http` |
pub async fn fetch_robots(client: &Client, origin: &str) -> Result<ParsedRobots, RobotsError> {
    let robots_url = format!("{}/robots.txt", origin.trim_end_matches('/'));
    tracing::debug!("Fetching {}", robots_url);

    let response = client
        .get(&robots_url)
        .send()
        .await
        .map_err(|source| RobotsError::Http {
            origin: origin.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_client_error() {
        return Ok(ParsedRobots::allow_all());
    }
    if !status.is_success() {
        return Err(RobotsError::Status {
            origin: origin.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| RobotsError::Http {
        origin: origin.to_string(),
        source,
    })?;
    Ok(ParsedRobots::from_content(&body))
}
