//! Crawler module for building a site's link graph
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with bounded timeouts
//! - HTML parsing and link extraction
//! - Breadth-first frontier scheduling under page and depth budgets
//! - Robots.txt permission and request pacing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod politeness;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{extract_links_simple, HtmlLinkExtractor, LinkExtractor};
pub use politeness::PolitenessGate;
pub use scheduler::{QueuedUrl, Scheduler};

use crate::config::Config;
use crate::graph::{classify, classify_undirected, shape_tags, stats};
use crate::graph::{GraphLabel, GraphStats, ShapeTag, SiteGraph};
use crate::url::NormalizedUrl;
use crate::CrawlError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// Every reachable URL within the depth budget was processed
    FrontierExhausted,
    /// The page budget was spent
    BudgetExhausted,
    /// Stopped by an external signal
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::BudgetExhausted => "page budget reached",
            Self::Cancelled => "cancelled",
        };
        f.write_str(reason)
    }
}

/// A finished crawl: the graph and everything computed from it
#[derive(Debug)]
pub struct CrawlOutcome {
    pub seed: NormalizedUrl,
    pub graph: SiteGraph,
    pub label: GraphLabel,
    pub undirected_label: GraphLabel,
    pub stats: GraphStats,
    pub shape_tags: Vec<ShapeTag>,
    pub pages_crawled: usize,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    /// Freezes a graph and runs every analysis over it
    pub fn new(
        seed: NormalizedUrl,
        graph: SiteGraph,
        stop_reason: StopReason,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seed,
            label: classify(&graph),
            undirected_label: classify_undirected(&graph),
            stats: stats(&graph),
            shape_tags: shape_tags(&graph),
            pages_crawled: graph.crawled_count(),
            graph,
            stop_reason,
            started_at,
            finished_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Wall-clock duration of the crawl
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Runs a complete crawl over HTTP
///
/// This is the main entry point. It validates the seed, crawls breadth-first
/// under the configured budgets, then classifies the finished graph.
///
/// # Arguments
///
/// * `seed` - The URL the crawl starts from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The graph and its analysis, possibly empty
/// * `Err(CrawlError)` - The seed was invalid or the HTTP client could not be built
pub async fn crawl(seed: &str, config: Config) -> Result<CrawlOutcome, CrawlError> {
    Coordinator::new(config)?.run(seed).await
}

/// Like [`crawl`], but stops early with partial results once `cancel` fires
pub async fn crawl_with_cancellation(
    seed: &str,
    config: Config,
    cancel: CancellationToken,
) -> Result<CrawlOutcome, CrawlError> {
    Coordinator::new(config)?
        .run_with_cancellation(seed, cancel)
        .await
}
