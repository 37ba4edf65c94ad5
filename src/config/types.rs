use serde::Deserialize;
use std::time::Duration;

/// Upper bound for any duration setting (one day)
pub const MAX_DURATION_SECS: f64 = 86_400.0;

/// Main configuration structure for a crawl
///
/// Built once per invocation and shared read-only with every component.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages to fetch
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum BFS depth from the seed (the seed is depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Only follow links whose host matches the seed's host
    #[serde(rename = "same-domain")]
    pub same_domain: bool,

    /// Delay between successive fetches (seconds)
    #[serde(rename = "inter-request-delay")]
    pub inter_request_delay: f64,

    /// Upper bound on a single fetch (seconds)
    #[serde(rename = "fetch-timeout")]
    pub fetch_timeout: f64,

    /// Number of frontier entries fetched in parallel
    pub concurrency: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 200,
            max_depth: 2,
            same_domain: true,
            inter_request_delay: 0.5,
            fetch_timeout: 10.0,
            concurrency: 1,
        }
    }
}

impl CrawlerConfig {
    /// The pacing delay as a `Duration`
    pub fn delay(&self) -> Duration {
        seconds(self.inter_request_delay)
    }

    /// The per-fetch timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        seconds(self.fetch_timeout)
    }
}

/// Converts seconds to a `Duration`, clamped to `0..=MAX_DURATION_SECS`
///
/// NaN becomes zero. Library callers may skip validation, so this never panics.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.clamp(0.0, MAX_DURATION_SECS)).unwrap_or_default()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the robots.txt product token
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "website-graph-analyzer".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL)`, the parenthesised part only
    /// when a contact URL is configured.
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}
