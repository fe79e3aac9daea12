//! Graph builder with up-front validation.
//!
//! The builder takes declared nodes and edges and checks them before
//! anything reaches the graph: duplicate identifiers and edges that
//! point at undeclared nodes are rejected in `build`.

use crate::edge::WeightedEdge;
use crate::error::GraphError;
use crate::graph::{NodeKey, SocialGraph};
use petgraph::EdgeType;
use std::collections::HashSet;
use std::marker::PhantomData;

/// Builds a `SocialGraph` from an explicit node list and edge list.
///
/// The builder handles the two-pass process:
/// 1. Register every declared node, rejecting duplicates
/// 2. Resolve every edge against the registered nodes
pub struct GraphBuilder<N, Ty> {
    nodes: Vec<N>,
    edges: Vec<WeightedEdge<N>>,
    _edge_type: PhantomData<Ty>,
}

impl<N: NodeKey, Ty: EdgeType> Default for GraphBuilder<N, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey, Ty: EdgeType> GraphBuilder<N, Ty> {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            _edge_type: PhantomData,
        }
    }

    /// Declares nodes in canonical order.
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Declares edges. Endpoints must be declared through [`Self::nodes`].
    pub fn edges<E: Into<WeightedEdge<N>>>(mut self, edges: impl IntoIterator<Item = E>) -> Self {
        self.edges.extend(edges.into_iter().map(Into::into));
        self
    }

    /// Validates everything and returns the graph.
    pub fn build(self) -> Result<SocialGraph<N, Ty>, GraphError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node) {
                return Err(GraphError::DuplicateNode(format!("{:?}", node)));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint) {
                    return Err(GraphError::UnknownNode(format!("{:?}", endpoint)));
                }
            }
        }

        let mut graph = SocialGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for edge in self.edges {
            graph.add_edge(&edge.source, &edge.target, Some(edge.weight))?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed = graph.is_directed(),
            "built graph"
        );

        Ok(graph)
    }
}
