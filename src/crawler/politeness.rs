//! Politeness gate: robots permission and inter-request pacing

use crate::robots::RobotsPolicy;
use crate::url::NormalizedUrl;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Decides whether a URL may be fetched and paces successive fetches
///
/// Robots lookups fail open: if the rules cannot be obtained, the URL is
/// allowed. Pacing is a single global delay, not per host.
pub struct PolitenessGate {
    robots: Arc<dyn RobotsPolicy>,
    delay: Duration,
}

impl PolitenessGate {
    pub fn new(robots: Arc<dyn RobotsPolicy>, delay: Duration) -> Self {
        Self { robots, delay }
    }

    /// Returns false only when robots rules explicitly disallow `url`
    pub async fn allowed(&self, url: &NormalizedUrl) -> bool {
        match self.robots.is_allowed(url).await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::debug!("Robots lookup failed for {}, allowing: {}", url, e);
                true
            }
        }
    }

    /// Sleeps for the configured inter-request delay
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Like [`wait`](Self::wait), but returns early once `cancel` fires
    pub async fn wait_or_cancel(&self, cancel: &CancellationToken) {
        tokio::select! {
            _ = self.wait() => {}
            _ = cancel.cancelled() => {}
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
