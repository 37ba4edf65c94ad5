use crate::graph::SiteGraph;
use crate::url::NormalizedUrl;
use petgraph::graph::NodeIndex;

/// Accumulates crawled pages and discovered links into a [`SiteGraph`]
///
/// Every operation is idempotent: re-adding a node or edge leaves the graph
/// unchanged. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: SiteGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `url` is a node, returning its index
    pub fn add_node(&mut self, url: &NormalizedUrl) -> NodeIndex {
        if let Some(&idx) = self.graph.index.get(url) {
            return idx;
        }
        let idx = self.graph.graph.add_node(url.clone());
        self.graph.index.insert(url.clone(), idx);
        idx
    }

    /// Registers a fetched page, even one that yielded no links
    pub fn add_page(&mut self, url: &NormalizedUrl) {
        let idx = self.add_node(url);
        self.graph.crawled.insert(idx);
    }

    /// Records the hyperlink `from -> to`, creating missing endpoints
    ///
    /// Returns true if the edge is new.
    pub fn add_edge(&mut self, from: &NormalizedUrl, to: &NormalizedUrl) -> bool {
        let a = self.add_node(from);
        let b = self.add_node(to);
        if self.graph.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.graph.add_edge(a, b, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Freezes the graph for read-only analysis
    pub fn finalize(self) -> SiteGraph {
        self.graph
    }
}
