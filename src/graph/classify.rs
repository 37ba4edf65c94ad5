//! Topology classification of a finished site graph
//!
//! The primary label comes from directed connectivity. An undirected variant
//! and a best-effort shape tagger work on the graph's undirected projection.

use crate::graph::SiteGraph;
use petgraph::algo::{
    connected_components, is_bipartite_undirected, is_cyclic_undirected, kosaraju_scc,
};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Topology label of a graph
///
/// The first five variants are produced by [`classify`]; the rest by
/// [`classify_undirected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphLabel {
    Empty,
    StronglyConnectedDirected,
    WeaklyConnectedDirected,
    DisconnectedDirected,
    /// Connectivity could not be evaluated
    DirectedUnknown,
    Tree,
    BipartiteConnected,
    Connected,
    Cyclic,
    Acyclic,
}

impl GraphLabel {
    /// Human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            Self::Empty => "Empty Graph",
            Self::StronglyConnectedDirected => "Strongly Connected Directed Graph",
            Self::WeaklyConnectedDirected => "Weakly Connected Directed Graph",
            Self::DisconnectedDirected => "Disconnected Directed Graph",
            Self::DirectedUnknown => "Directed Graph (connectivity not determined)",
            Self::Tree => "Tree",
            Self::BipartiteConnected => "Bipartite Connected Graph",
            Self::Connected => "Connected Graph",
            Self::Cyclic => "Cyclic Graph",
            Self::Acyclic => "Acyclic Graph",
        }
    }
}

impl fmt::Display for GraphLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Shape detected from the degree sequence of the undirected projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeTag {
    Star,
    Ring,
    FullMesh,
    Tree,
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Star => "star",
            Self::Ring => "ring",
            Self::FullMesh => "full mesh",
            Self::Tree => "tree",
        };
        f.write_str(name)
    }
}

/// Classifies a graph by directed connectivity
///
/// | Condition | Label |
/// |-----------|-------|
/// | No nodes | `Empty` |
/// | One strongly connected component | `StronglyConnectedDirected` |
/// | One weakly connected component | `WeaklyConnectedDirected` |
/// | Otherwise | `DisconnectedDirected` |
pub fn classify(graph: &SiteGraph) -> GraphLabel {
    let g = graph.as_petgraph();
    if g.node_count() == 0 {
        return GraphLabel::Empty;
    }

    let strong = kosaraju_scc(g).len();
    // connected_components ignores edge direction on a directed graph
    let weak = connected_components(g);

    match (strong, weak) {
        (1, _) => GraphLabel::StronglyConnectedDirected,
        (_, 1) => GraphLabel::WeaklyConnectedDirected,
        (0, _) | (_, 0) => GraphLabel::DirectedUnknown,
        _ => GraphLabel::DisconnectedDirected,
    }
}

/// Classifies the undirected projection of a graph
///
/// Connected projections are `Tree`, `BipartiteConnected` or `Connected`,
/// checked in that order. Disconnected ones are `Cyclic` or `Acyclic`.
/// A self-loop is a cycle and rules out both trees and bipartiteness.
pub fn classify_undirected(graph: &SiteGraph) -> GraphLabel {
    let projection = Projection::of(graph);
    let n = projection.graph.node_count();
    if n == 0 {
        return GraphLabel::Empty;
    }

    if connected_components(&projection.graph) == 1 {
        if projection.is_tree() {
            GraphLabel::Tree
        } else if projection.self_loops == 0
            && is_bipartite_undirected(&projection.graph, NodeIndex::new(0))
        {
            GraphLabel::BipartiteConnected
        } else {
            GraphLabel::Connected
        }
    } else if projection.self_loops > 0 || is_cyclic_undirected(&projection.graph) {
        GraphLabel::Cyclic
    } else {
        GraphLabel::Acyclic
    }
}

/// Tags the graph with zero or more recognizable shapes
///
/// Best-effort and advisory: the tags never change the label from [`classify`].
/// Self-loops are ignored.
///
/// - `star`: a tree of at least 3 nodes with a hub adjacent to every other node
/// - `ring`: at least 3 nodes, connected, every node has degree 2
/// - `full mesh`: every pair of distinct nodes is adjacent
/// - `tree`: connected with exactly `n - 1` edges
pub fn shape_tags(graph: &SiteGraph) -> Vec<ShapeTag> {
    let projection = Projection::of(graph);
    let g = &projection.graph;
    let n = g.node_count();
    if n < 2 {
        return Vec::new();
    }

    let m = g.edge_count();
    let connected = connected_components(g) == 1;
    let degrees: Vec<usize> = g.node_indices().map(|idx| g.neighbors(idx).count()).collect();
    let is_tree = connected && m == n - 1;

    let mut tags = Vec::new();
    if n >= 3 && is_tree && degrees.iter().any(|&d| d == n - 1) {
        tags.push(ShapeTag::Star);
    }
    if n >= 3 && connected && m == n && degrees.iter().all(|&d| d == 2) {
        tags.push(ShapeTag::Ring);
    }
    if m == n * (n - 1) / 2 {
        tags.push(ShapeTag::FullMesh);
    }
    if is_tree {
        tags.push(ShapeTag::Tree);
    }
    tags
}

/// Undirected projection without parallel edges or self-loops
struct Projection {
    graph: UnGraph<(), ()>,
    self_loops: usize,
}

impl Projection {
    fn of(site: &SiteGraph) -> Self {
        let g = site.as_petgraph();
        let mut graph = UnGraph::with_capacity(g.node_count(), g.edge_count());
        // Same insertion order, so node indices line up with the directed graph
        for _ in g.node_indices() {
            graph.add_node(());
        }

        let mut pairs: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        let mut self_loops = 0;
        for edge in g.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if a == b {
                self_loops += 1;
                continue;
            }
            let pair = (a.min(b), a.max(b));
            if pairs.insert(pair) {
                graph.add_edge(pair.0, pair.1, ());
            }
        }

        Self { graph, self_loops }
    }

    fn is_tree(&self) -> bool {
        self.self_loops == 0 && self.graph.edge_count() + 1 == self.graph.node_count()
    }
}
