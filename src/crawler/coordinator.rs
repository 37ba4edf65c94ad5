//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Draining the frontier in breadth-first batches
//! - Robots checks and the page budget
//! - Fetching, link extraction, and graph construction
//! - Pacing and cancellation

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, Fetcher, HttpFetcher};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::politeness::PolitenessGate;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::crawler::{CrawlOutcome, StopReason};
use crate::graph::GraphBuilder;
use crate::robots::HttpRobots;
use crate::url::{normalize, normalize_seed};
use crate::CrawlError;
use chrono::Utc;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

const PROGRESS_INTERVAL: usize = 10;

/// Main crawler coordinator structure
///
/// Holds the read-only collaborators for a crawl. All mutable crawl state
/// (frontier, seen set, graph) lives inside a single [`run`](Self::run) call.
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    gate: PolitenessGate,
}

impl Coordinator {
    /// Creates a coordinator that crawls over HTTP
    ///
    /// One reqwest client is shared by page fetches and robots.txt lookups.
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let client = build_http_client(&config)?;
        let robots = HttpRobots::new(client.clone(), config.user_agent.crawler_name.clone());
        let gate = PolitenessGate::new(Arc::new(robots), config.crawler.delay());

        Ok(Self::with_collaborators(
            config,
            Arc::new(HttpFetcher::new(client)),
            Arc::new(HtmlLinkExtractor),
            gate,
        ))
    }

    /// Creates a coordinator from explicit collaborators
    pub fn with_collaborators(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        gate: PolitenessGate,
    ) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            extractor,
            gate,
        }
    }

    /// Crawls from `seed` until the frontier or the page budget runs out
    pub async fn run(&self, seed: &str) -> Result<CrawlOutcome, CrawlError> {
        self.run_with_cancellation(seed, CancellationToken::new())
            .await
    }

    /// Crawls from `seed`, stopping early once `cancel` fires
    ///
    /// Cancellation is not an error: the graph built so far is returned with
    /// [`StopReason::Cancelled`]. Only an invalid seed fails the crawl.
    pub async fn run_with_cancellation(
        &self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlOutcome, CrawlError> {
        let seed_url = normalize_seed(seed).map_err(|source| CrawlError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;
        let seed_host = seed_url.host();

        let crawler = &self.config.crawler;
        let batch_size = crawler.concurrency.max(1);
        let mut scheduler = Scheduler::new(seed_url.clone(), crawler.max_depth);
        let mut builder = GraphBuilder::new();
        let pages_crawled = AtomicUsize::new(0);
        let mut pages_applied = 0;

        let started_at = Utc::now();
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (max pages {}, max depth {}, concurrency {})",
            seed_url,
            crawler.max_pages,
            crawler.max_depth,
            batch_size
        );

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if pages_crawled.load(Ordering::SeqCst) >= crawler.max_pages {
                break StopReason::BudgetExhausted;
            }

            let batch = scheduler.next_batch(batch_size);
            if batch.is_empty() {
                break StopReason::FrontierExhausted;
            }

            let verdicts = join_all(batch.iter().map(|queued| self.gate.allowed(&queued.url))).await;

            let mut claimed = Vec::with_capacity(batch.len());
            for (queued, allowed) in batch.into_iter().zip(verdicts) {
                if !allowed {
                    tracing::info!("URL {} disallowed by robots.txt", queued.url);
                    continue;
                }
                if !claim_page(&pages_crawled, crawler.max_pages) {
                    break;
                }
                claimed.push(queued);
            }
            if claimed.is_empty() {
                continue;
            }

            let fetched = tokio::select! {
                results = join_all(claimed.iter().map(|queued| self.fetch_links(queued))) => Some(results),
                _ = cancel.cancelled() => None,
            };
            let Some(fetched) = fetched else {
                break StopReason::Cancelled;
            };

            for (queued, (base, hrefs)) in claimed.iter().zip(fetched) {
                builder.add_page(&queued.url);

                for href in &hrefs {
                    let Some(link) = normalize(&base, href) else {
                        tracing::debug!("Skipping unfollowable link {:?} on {}", href, base);
                        continue;
                    };
                    if crawler.same_domain && link.host() != seed_host {
                        tracing::debug!("Skipping off-site link {}", link);
                        continue;
                    }

                    builder.add_edge(&queued.url, &link);
                    if pages_crawled.load(Ordering::SeqCst) < crawler.max_pages {
                        scheduler.offer(&link, queued.depth + 1);
                    }
                }

                pages_applied += 1;
                if pages_applied % PROGRESS_INTERVAL == 0 {
                    let rate = pages_applied as f64 / start_time.elapsed().as_secs_f64();
                    tracing::info!(
                        "Progress: {} pages crawled, {} nodes, {} in frontier, {:.2} pages/sec",
                        pages_applied,
                        builder.node_count(),
                        scheduler.frontier_size(),
                        rate
                    );
                }
            }

            let more_to_fetch = !scheduler.is_empty()
                && pages_crawled.load(Ordering::SeqCst) < crawler.max_pages;
            if more_to_fetch {
                self.gate.wait_or_cancel(&cancel).await;
            }
        };

        let graph = builder.finalize();
        let finished_at = Utc::now();

        tracing::info!(
            "Crawl finished ({}): {} pages crawled, {} nodes, {} edges in {:?}",
            stop_reason,
            graph.crawled_count(),
            graph.node_count(),
            graph.edge_count(),
            start_time.elapsed()
        );
        if graph.is_empty() {
            tracing::warn!("No nodes found - check the URL or increase max pages/depth.");
        }

        Ok(CrawlOutcome::new(
            seed_url,
            graph,
            stop_reason,
            started_at,
            finished_at,
        ))
    }

    /// Fetches one page and extracts its raw hrefs
    ///
    /// Fail-soft: any fetch, timeout, or parse failure yields no links. The
    /// returned base is the URL relative links resolve against.
    async fn fetch_links(&self, queued: &QueuedUrl) -> (String, Vec<String>) {
        let url = &queued.url;
        tracing::debug!("Fetching {} (depth {})", url, queued.depth);

        let timeout = self.config.crawler.timeout();
        let page = match tokio::time::timeout(timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                tracing::debug!("Failed to fetch {}: {}", url, e);
                return (url.to_string(), Vec::new());
            }
            Err(_) => {
                tracing::debug!("Fetch of {} timed out after {:?}", url, timeout);
                return (url.to_string(), Vec::new());
            }
        };

        tracing::trace!("{} returned {}", page.final_url, page.status_code);

        match self.extractor.extract_links(&page.body, &page.final_url) {
            Ok(links) => (page.final_url, links),
            Err(e) => {
                tracing::debug!("{}", e);
                (page.final_url, Vec::new())
            }
        }
    }
}

/// Claims one slot of the page budget, failing once it is spent
fn claim_page(counter: &AtomicUsize, max_pages: usize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            (n < max_pages).then_some(n + 1)
        })
        .is_ok()
}
