//! Core graph data structure.
//!
//! `SocialGraph` wraps petgraph and adds an identifier index so callers
//! can address nodes by their own keys. Every centrality measure reads
//! this structure; none of them mutate it.

use crate::edge::{WeightedEdge, DEFAULT_WEIGHT};
use crate::error::GraphError;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, EdgeType, Undirected};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a node identifier.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

/// A social network with weighted edges.
///
/// Node insertion order is the canonical ordering used for matrix
/// indexing. Nodes are never removed, so petgraph indexes stay dense.
#[derive(Debug, Clone)]
pub struct SocialGraph<N, Ty: EdgeType = Undirected> {
    /// The underlying petgraph graph.
    pub(crate) graph: Graph<N, f64, Ty>,

    /// Maps identifiers to graph node indexes.
    id_index: HashMap<N, NodeIndex>,
}

/// An undirected social graph.
pub type UnSocialGraph<N> = SocialGraph<N, Undirected>;

/// A directed social graph.
pub type DiSocialGraph<N> = SocialGraph<N, Directed>;

impl<N: NodeKey, Ty: EdgeType> Default for SocialGraph<N, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey, Ty: EdgeType> SocialGraph<N, Ty> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: Graph::default(),
            id_index: HashMap::new(),
        }
    }

    /// Creates an empty graph with preallocated storage.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: Graph::with_capacity(nodes, edges),
            id_index: HashMap::with_capacity(nodes),
        }
    }

    /// Builds a graph from an edge list, inserting endpoints as they appear.
    pub fn from_edges<I, E>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge<N>>,
    {
        let mut graph = Self::new();
        for edge in edges {
            let edge = edge.into();
            graph.ensure_node(edge.source.clone());
            graph.ensure_node(edge.target.clone());
            graph.add_edge(&edge.source, &edge.target, Some(edge.weight))?;
        }
        Ok(graph)
    }

    /// Adds a node. Fails if the identifier is already present.
    pub fn add_node(&mut self, id: N) -> Result<NodeIndex, GraphError> {
        if self.id_index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(format!("{:?}", id)));
        }
        let index = self.graph.add_node(id.clone());
        self.id_index.insert(id, index);
        Ok(index)
    }

    /// Returns the index of `id`, inserting it first if needed.
    pub fn ensure_node(&mut self, id: N) -> NodeIndex {
        if let Some(index) = self.id_index.get(&id) {
            return *index;
        }
        let index = self.graph.add_node(id.clone());
        self.id_index.insert(id, index);
        index
    }

    /// Adds an edge between two existing nodes.
    ///
    /// A missing weight means [`DEFAULT_WEIGHT`]. Adding an edge that
    /// already exists replaces its weight, so the graph stays simple.
    pub fn add_edge(&mut self, source: &N, target: &N, weight: Option<f64>) -> Result<(), GraphError> {
        let from = self.require(source)?;
        let to = self.require(target)?;
        let weight = weight.unwrap_or(DEFAULT_WEIGHT);

        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight {
                from: format!("{:?}", source),
                target: format!("{:?}", target),
                weight,
            });
        }

        self.graph.update_edge(from, to, weight);
        Ok(())
    }

    fn require(&self, id: &N) -> Result<NodeIndex, GraphError> {
        self.id_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(format!("{:?}", id)))
    }

    /// Whether edges are one-way.
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges. Undirected edges count once.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the identifier is a node of this graph.
    pub fn contains(&self, id: &N) -> bool {
        self.id_index.contains_key(id)
    }

    /// Gets the canonical position of a node.
    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.id_index.get(id).map(|index| index.index())
    }

    /// Iterates over node identifiers in canonical order.
    pub fn node_ids(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Iterates over all edges as `(source, target, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> + '_ {
        self.graph.edge_references().map(move |edge_ref| {
            (
                &self.graph[edge_ref.source()],
                &self.graph[edge_ref.target()],
                *edge_ref.weight(),
            )
        })
    }

    /// Returns all edges flattened for export.
    pub fn export_edges(&self) -> Vec<WeightedEdge<N>> {
        self.edges()
            .map(|(source, target, weight)| WeightedEdge::new(source.clone(), target.clone(), Some(weight)))
            .collect()
    }

    /// Nodes reachable in one hop: successors when directed, all
    /// adjacent nodes when undirected.
    pub fn neighbors(&self, id: &N) -> Vec<&N> {
        match self.id_index.get(id) {
            Some(index) => self
                .graph
                .neighbors(*index)
                .map(|neighbor| &self.graph[neighbor])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Dense-index neighbor lists in canonical order, following the
    /// same direction rules as [`Self::neighbors`].
    pub(crate) fn neighbor_lists(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|index| self.graph.neighbors(index).map(|n| n.index()).collect())
            .collect()
    }
}

/// Graph statistics for the CLI `stats` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub self_loops: usize,
    pub isolated: usize,
}

impl<N: NodeKey, Ty: EdgeType> SocialGraph<N, Ty> {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let self_loops = self
            .graph
            .edge_references()
            .filter(|edge_ref| edge_ref.source() == edge_ref.target())
            .count();
        let isolated = self
            .graph
            .node_indices()
            .filter(|index| self.graph.neighbors_undirected(*index).next().is_none())
            .count();

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            directed: self.is_directed(),
            self_loops,
            isolated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = UnSocialGraph::new();
        graph.add_node("a").unwrap();
        let err = graph.add_node("a").unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode("\"a\"".to_string()));
    }

    #[test]
    fn test_edge_to_unknown_node_rejected() {
        let mut graph = UnSocialGraph::new();
        graph.add_node(1).unwrap();
        let err = graph.add_edge(&1, &2, None).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode("2".to_string()));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut graph = DiSocialGraph::new();
        graph.add_node("a").unwrap();
        graph.add_node("b").unwrap();
        let err = graph.add_edge(&"a", &"b", Some(f64::NAN)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
        assert_eq!(err.to_string(), "Edge \"a\" -> \"b\" has non-finite weight NaN");
    }

    #[test]
    fn test_repeated_edge_replaces_weight() {
        let graph = UnSocialGraph::from_edges(vec![("a", "b", 0.5), ("b", "a", 0.75)]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        let (_, _, weight) = graph.edges().next().unwrap();
        assert_eq!(weight, 0.75);
    }

    #[test]
    fn test_canonical_order_is_insertion_order() {
        let graph = DiSocialGraph::from_edges(vec![("z", "a"), ("m", "z")]).unwrap();
        let ids: Vec<_> = graph.node_ids().copied().collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(graph.index_of(&"m"), Some(2));
        assert_eq!(graph.index_of(&"q"), None);
    }

    #[test]
    fn test_neighbors_follow_direction() {
        let directed = DiSocialGraph::from_edges(vec![("a", "b")]).unwrap();
        assert_eq!(directed.neighbors(&"a"), vec![&"b"]);
        assert!(directed.neighbors(&"b").is_empty());

        let undirected = UnSocialGraph::from_edges(vec![("a", "b")]).unwrap();
        assert_eq!(undirected.neighbors(&"b"), vec![&"a"]);
    }

    #[test]
    fn test_stats() {
        let mut graph = UnSocialGraph::from_edges(vec![("a", "b"), ("c", "c")]).unwrap();
        graph.add_node("lonely").unwrap();

        let stats = graph.stats();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert!(!stats.directed);
        assert_eq!(stats.self_loops, 1);
        assert_eq!(stats.isolated, 1);
    }
}
