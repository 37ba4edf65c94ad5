//! Frontier scheduler for the breadth-first crawl
//!
//! This module handles:
//! - The FIFO frontier of `(url, depth)` entries
//! - The seen set that keeps every URL from being enqueued twice
//! - The depth budget

use crate::url::NormalizedUrl;
use std::collections::{HashSet, VecDeque};

/// A URL queued for fetching with its BFS depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: NormalizedUrl,

    /// Distance from the seed, fixed when the entry is enqueued
    pub depth: u32,
}

/// Scheduler manages the frontier queue and the seen set
///
/// Entries come out in exactly the order they went in. A URL is marked seen
/// at the moment it is first enqueued and is never enqueued again.
#[derive(Debug)]
pub struct Scheduler {
    /// Frontier queue of URLs to fetch, earliest discovered first
    frontier: VecDeque<QueuedUrl>,

    /// Every URL ever enqueued
    seen: HashSet<NormalizedUrl>,

    max_depth: u32,
}

impl Scheduler {
    /// Creates a scheduler whose frontier holds only the seed at depth 0
    pub fn new(seed: NormalizedUrl, max_depth: u32) -> Self {
        let mut seen = HashSet::new();
        seen.insert(seed.clone());

        Self {
            frontier: VecDeque::from([QueuedUrl {
                url: seed,
                depth: 0,
            }]),
            seen,
            max_depth,
        }
    }

    /// Gets the next URL to fetch
    ///
    /// Entries deeper than the depth budget are discarded here.
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        while let Some(queued) = self.frontier.pop_front() {
            if queued.depth > self.max_depth {
                tracing::trace!("Discarding {} at depth {}", queued.url, queued.depth);
                continue;
            }
            return Some(queued);
        }
        None
    }

    /// Takes up to `size` entries in frontier order
    pub fn next_batch(&mut self, size: usize) -> Vec<QueuedUrl> {
        let mut batch = Vec::with_capacity(size);
        while batch.len() < size {
            match self.next_url() {
                Some(queued) => batch.push(queued),
                None => break,
            }
        }
        batch
    }

    /// Enqueues `url` at `depth` if it is within the depth budget and unseen
    ///
    /// Returns true if the URL was enqueued. A URL rejected for depth is not
    /// marked seen.
    pub fn offer(&mut self, url: &NormalizedUrl, depth: u32) -> bool {
        if depth > self.max_depth {
            return false;
        }
        if !self.seen.insert(url.clone()) {
            return false;
        }
        tracing::trace!("Enqueued {} at depth {}", url, depth);
        self.frontier.push_back(QueuedUrl {
            url: url.clone(),
            depth,
        });
        true
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of URLs ever enqueued, the seed included
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
