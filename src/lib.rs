//! Website-Graph: a polite site crawler that maps a website's link graph
//!
//! This crate crawls a site breadth-first from a seed URL, records every observed
//! hyperlink as a directed edge, and classifies the resulting graph's topology.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only failures that happen before the first fetch surface through this type.
/// Per-page failures are absorbed by the crawl loop.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed { url: String, source: UrlError },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Failure to fetch a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("No page at {url}")]
    NotFound { url: String },
}

/// Failure to extract links from fetched content
#[derive(Debug, Error)]
#[error("HTML parse error for {url}: {message}")]
pub struct ParseError {
    pub url: String,
    pub message: String,
}

/// Failure to obtain robots.txt rules for an origin
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("robots.txt request failed for {origin}: {source}")]
    Http {
        origin: String,
        source: reqwest::Error,
    },

    #[error("robots.txt for {origin} returned status {status}")]
    Status { origin: String, status: u16 },

    #[error("robots.txt lookup failed: {0}")]
    Unavailable(String),
}

/// Failure to render a crawl report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome, StopReason};
pub use graph::{classify, stats, GraphLabel, GraphStats, SiteGraph};
pub use url::{normalize, normalize_seed, NormalizedUrl};
