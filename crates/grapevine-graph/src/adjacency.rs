//! Dense matrix views of a social graph.
//!
//! Every matrix-based measure builds a fresh `AdjacencyMatrix` per call
//! and drops it on return. Rows and columns follow the graph's canonical
//! node ordering.

use crate::graph::{NodeKey, SocialGraph};
use ndarray::{Array1, Array2, Axis};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;
use std::collections::HashMap;

/// Injective mapping between node identifiers and matrix positions.
#[derive(Debug, Clone)]
pub struct NodeOrdering<N> {
    nodes: Vec<N>,
    positions: HashMap<N, usize>,
}

impl<N: NodeKey> NodeOrdering<N> {
    /// Captures the canonical ordering of `graph`.
    pub fn of<Ty: EdgeType>(graph: &SocialGraph<N, Ty>) -> Self {
        Self::from_nodes(graph.node_ids().cloned())
    }

    /// Builds an ordering from an explicit sequence. Repeated nodes are
    /// dropped after their first occurrence, so positions stay dense.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut ordered = Vec::new();
        let mut positions = HashMap::new();
        for node in nodes {
            if !positions.contains_key(&node) {
                positions.insert(node.clone(), ordered.len());
                ordered.push(node);
            }
        }
        Self {
            nodes: ordered,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, node: &N) -> Option<usize> {
        self.positions.get(node).copied()
    }

    pub fn node(&self, position: usize) -> Option<&N> {
        self.nodes.get(position)
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

/// An n×n matrix over the graph's nodes, entry (i, j) describing i → j.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<N> {
    ordering: NodeOrdering<N>,
    matrix: Array2<f64>,
}

impl<N: NodeKey> AdjacencyMatrix<N> {
    /// The weighted transition matrix P.
    ///
    /// Undirected edges appear in both directions with equal weight.
    pub fn weighted<Ty: EdgeType>(graph: &SocialGraph<N, Ty>) -> Self {
        Self::build(graph, |weight| weight)
    }

    /// The 0/1 indicator matrix g. Any non-zero weight counts as a link.
    pub fn indicator<Ty: EdgeType>(graph: &SocialGraph<N, Ty>) -> Self {
        Self::build(graph, |weight| if weight != 0.0 { 1.0 } else { 0.0 })
    }

    fn build<Ty: EdgeType>(graph: &SocialGraph<N, Ty>, entry: impl Fn(f64) -> f64) -> Self {
        let ordering = NodeOrdering::of(graph);
        let n = ordering.len();
        let mut matrix = Array2::<f64>::zeros((n, n));

        // petgraph indexes are dense and follow insertion order, which is
        // exactly the canonical ordering.
        for edge_ref in graph.graph.edge_references() {
            let i = edge_ref.source().index();
            let j = edge_ref.target().index();
            let value = entry(*edge_ref.weight());
            matrix[[i, j]] = value;
            if !graph.is_directed() {
                matrix[[j, i]] = value;
            }
        }

        Self { ordering, matrix }
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn ordering(&self) -> &NodeOrdering<N> {
        &self.ordering
    }

    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    /// Non-zero entries of row `i` as `(column, value)` pairs.
    pub fn out_links(&self, i: usize) -> Vec<(usize, f64)> {
        self.matrix
            .row(i)
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0.0)
            .map(|(j, value)| (j, *value))
            .collect()
    }

    /// Splits into the ordering and the raw matrix.
    pub fn into_parts(self) -> (NodeOrdering<N>, Array2<f64>) {
        (self.ordering, self.matrix)
    }
}

/// Raises a square matrix to a non-negative integer power.
///
/// Uses repeated squaring, like `numpy.linalg.matrix_power`. Power 0 is
/// the identity.
pub fn matrix_power(matrix: &Array2<f64>, power: u32) -> Array2<f64> {
    let n = matrix.nrows();
    let mut result = Array2::<f64>::eye(n);
    if power == 0 {
        return result;
    }

    let mut base = matrix.clone();
    let mut exponent = power;
    let mut first = true;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = if first { base.clone() } else { result.dot(&base) };
            first = false;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = base.dot(&base);
        }
    }
    result
}

/// Sum of each row.
pub fn row_sums(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.sum_axis(Axis(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiSocialGraph, UnSocialGraph};
    use ndarray::array;

    #[test]
    fn test_undirected_edges_are_mirrored() {
        let graph = UnSocialGraph::from_edges(vec![("a", "b", 0.3)]).unwrap();
        let adjacency = AdjacencyMatrix::weighted(&graph);

        assert_eq!(adjacency.matrix(), &array![[0.0, 0.3], [0.3, 0.0]]);
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.3)]).unwrap();
        let adjacency = AdjacencyMatrix::weighted(&graph);

        assert_eq!(adjacency.matrix(), &array![[0.0, 0.3], [0.0, 0.0]]);
        assert_eq!(adjacency.out_links(0), vec![(1, 0.3)]);
        assert!(adjacency.out_links(1).is_empty());
    }

    #[test]
    fn test_indicator_ignores_weight_values() {
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 7.5), ("b", "a", 0.0)]).unwrap();
        let adjacency = AdjacencyMatrix::indicator(&graph);

        assert_eq!(adjacency.matrix(), &array![[0.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_ordering_positions() {
        let ordering = NodeOrdering::from_nodes(["x", "y", "z"]);
        assert_eq!(ordering.position(&"z"), Some(2));
        assert_eq!(ordering.node(1), Some(&"y"));
        assert_eq!(ordering.position(&"w"), None);
    }

    #[test]
    fn test_ordering_drops_repeated_nodes() {
        let ordering = NodeOrdering::from_nodes(["x", "y", "x", "z", "y"]);
        assert_eq!(ordering.len(), 3);
        assert_eq!(ordering.nodes(), &["x", "y", "z"]);
        assert_eq!(ordering.position(&"z"), Some(2));
    }

    #[test]
    fn test_matrix_power() {
        let m = array![[1.0, 1.0], [0.0, 1.0]];

        assert_eq!(matrix_power(&m, 0), Array2::<f64>::eye(2));
        assert_eq!(matrix_power(&m, 1), m);
        assert_eq!(matrix_power(&m, 5), array![[1.0, 5.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_matrix_power_of_empty_matrix() {
        let m = Array2::<f64>::zeros((0, 0));
        assert_eq!(matrix_power(&m, 3).dim(), (0, 0));
    }

    #[test]
    fn test_row_sums() {
        let m = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(row_sums(&m), array![3.0, 7.0]);
    }
}
