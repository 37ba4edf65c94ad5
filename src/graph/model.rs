use crate::url::NormalizedUrl;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed graph of pages keyed by normalized URL
///
/// Nodes are pages, edges are observed hyperlinks. At most one edge exists per
/// ordered pair; self-loops are allowed. Nodes that were reached only through
/// an edge (never fetched) are present but not marked as crawled.
///
/// Only [`GraphBuilder`](super::GraphBuilder) mutates a `SiteGraph`; consumers
/// get it read-only.
#[derive(Debug, Clone, Default)]
pub struct SiteGraph {
    pub(super) graph: DiGraph<NormalizedUrl, ()>,
    pub(super) index: HashMap<NormalizedUrl, NodeIndex>,
    pub(super) crawled: HashSet<NodeIndex>,
}

impl SiteGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NormalizedUrl> {
        self.graph.node_weights()
    }

    /// Edges as `(source, target)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&NormalizedUrl, &NormalizedUrl)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Pages that were actually fetched, in crawl order
    pub fn crawled(&self) -> impl Iterator<Item = &NormalizedUrl> {
        self.graph
            .node_indices()
            .filter(|idx| self.crawled.contains(idx))
            .map(|idx| &self.graph[idx])
    }

    pub fn crawled_count(&self) -> usize {
        self.crawled.len()
    }

    pub fn contains_node(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn is_crawled(&self, url: &str) -> bool {
        self.index
            .get(url)
            .is_some_and(|idx| self.crawled.contains(idx))
    }

    /// Number of edges leaving `url` (0 for unknown URLs)
    pub fn out_degree(&self, url: &str) -> usize {
        self.directed_degree(url, Direction::Outgoing)
    }

    /// Number of edges entering `url` (0 for unknown URLs)
    pub fn in_degree(&self, url: &str) -> usize {
        self.directed_degree(url, Direction::Incoming)
    }

    /// Total degree: in-degree plus out-degree. A self-loop counts twice.
    pub fn degree(&self, url: &str) -> usize {
        self.in_degree(url) + self.out_degree(url)
    }

    fn directed_degree(&self, url: &str, direction: Direction) -> usize {
        self.index
            .get(url)
            .map_or(0, |&idx| self.graph.edges_directed(idx, direction).count())
    }

    pub(crate) fn as_petgraph(&self) -> &DiGraph<NormalizedUrl, ()> {
        &self.graph
    }
}
