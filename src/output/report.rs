use crate::crawler::{CrawlOutcome, StopReason};
use crate::graph::{GraphLabel, ShapeTag};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A directed edge in report form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
}

/// Everything a caller needs to present a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub classification: GraphLabel,
    pub classification_name: String,
    pub undirected_classification: GraphLabel,
    pub shape_tags: Vec<ShapeTag>,
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub pages_crawled: usize,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
    pub nodes: Vec<String>,
    /// Nodes that were actually fetched
    pub crawled: Vec<String>,
    pub edges: Vec<EdgeRecord>,
}

impl CrawlReport {
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let elapsed = outcome.elapsed();
        let elapsed_seconds = elapsed
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_else(|| elapsed.num_seconds() as f64);

        Self {
            seed: outcome.seed.to_string(),
            classification: outcome.label,
            classification_name: outcome.label.description().to_string(),
            undirected_classification: outcome.undirected_label,
            shape_tags: outcome.shape_tags.clone(),
            node_count: outcome.stats.node_count,
            edge_count: outcome.stats.edge_count,
            average_degree: outcome.stats.average_degree,
            pages_crawled: outcome.pages_crawled,
            stop_reason: outcome.stop_reason,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
            elapsed_seconds,
            nodes: outcome.graph.nodes().map(|n| n.to_string()).collect(),
            crawled: outcome.graph.crawled().map(|n| n.to_string()).collect(),
            edges: outcome
                .graph
                .edges()
                .map(|(from, to)| EdgeRecord {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
