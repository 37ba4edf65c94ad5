use crate::graph::SiteGraph;
use petgraph::Direction;
use serde::Serialize;

/// Summary metrics of a finished graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Mean total degree (in + out) per node, 0 for an empty graph
    pub average_degree: f64,
}

impl GraphStats {
    pub fn from_graph(graph: &SiteGraph) -> Self {
        let g = graph.as_petgraph();
        let node_count = g.node_count();

        let degree_sum: usize = g
            .node_indices()
            .map(|idx| {
                g.edges_directed(idx, Direction::Incoming).count()
                    + g.edges_directed(idx, Direction::Outgoing).count()
            })
            .sum();

        let average_degree = if node_count == 0 {
            0.0
        } else {
            degree_sum as f64 / node_count as f64
        };

        Self {
            node_count,
            edge_count: g.edge_count(),
            average_degree,
        }
    }
}

/// Computes node count, edge count and average degree
pub fn stats(graph: &SiteGraph) -> GraphStats {
    GraphStats::from_graph(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::url::NormalizedUrl;

    fn url(name: &str) -> NormalizedUrl {
        NormalizedUrl::from_absolute(&format!("https://example.com/{}", name)).unwrap()
    }

    #[test]
    fn test_empty_graph_has_zero_average() {
        let graph = GraphBuilder::new().finalize();
        let stats = stats(&graph);
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(stats.average_degree, 0.0);
    }

    #[test]
    fn test_chain_average_degree() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(&url("a"), &url("b"));
        builder.add_edge(&url("b"), &url("c"));

        let stats = stats(&builder.finalize());
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert!((stats.average_degree - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut builder = GraphBuilder::new();
        builder.add_page(&url("a"));
        builder.add_edge(&url("a"), &url("a"));

        let stats = stats(&builder.finalize());
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.average_degree, 2.0);
    }

    #[test]
    fn test_isolated_node() {
        let mut builder = GraphBuilder::new();
        builder.add_page(&url("a"));

        let stats = stats(&builder.finalize());
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.average_degree, 0.0);
    }
}
