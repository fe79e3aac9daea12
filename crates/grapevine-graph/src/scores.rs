//! Per-node centrality results.

use crate::adjacency::NodeOrdering;
use crate::graph::NodeKey;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from node identifier to score. Look scores up by identity;
/// iteration order is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentralityScores<N: NodeKey, S = f64> {
    scores: HashMap<N, S>,
}

impl<N: NodeKey, S: Copy> CentralityScores<N, S> {
    /// Maps positional values back to the nodes of `ordering`.
    pub fn from_positions(ordering: &NodeOrdering<N>, values: impl IntoIterator<Item = S>) -> Self {
        let scores = ordering
            .nodes()
            .iter()
            .cloned()
            .zip(values)
            .collect();
        Self { scores }
    }

    /// Gets the score of a node.
    pub fn get(&self, node: &N) -> Option<S> {
        self.scores.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &S)> {
        self.scores.iter()
    }

    pub fn into_inner(self) -> HashMap<N, S> {
        self.scores
    }
}

impl<N: NodeKey, S: Copy + PartialOrd> CentralityScores<N, S> {
    /// Scores sorted from highest to lowest. Ties keep `ordering`'s order.
    pub fn ranked(&self, ordering: &NodeOrdering<N>) -> Vec<(N, S)> {
        let mut ranked: Vec<(N, S)> = ordering
            .nodes()
            .iter()
            .filter_map(|node| self.get(node).map(|score| (node.clone(), score)))
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

impl<N: NodeKey> CentralityScores<N, f64> {
    pub(crate) fn from_vector(ordering: &NodeOrdering<N>, values: &Array1<f64>) -> Self {
        Self::from_positions(ordering, values.iter().copied())
    }

    /// First node whose score is NaN or infinite, if any.
    pub(crate) fn first_non_finite<'o>(&self, ordering: &'o NodeOrdering<N>) -> Option<&'o N> {
        ordering
            .nodes()
            .iter()
            .find(|node| self.get(node).is_some_and(|score| !score.is_finite()))
    }
}

impl<N: NodeKey, S> FromIterator<(N, S)> for CentralityScores<N, S> {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_identity() {
        let ordering = NodeOrdering::from_nodes(["a", "b"]);
        let scores = CentralityScores::from_positions(&ordering, [1.5, 2.5]);

        assert_eq!(scores.get(&"b"), Some(2.5));
        assert_eq!(scores.get(&"c"), None);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let ordering = NodeOrdering::from_nodes(["a", "b", "c"]);
        let scores = CentralityScores::from_positions(&ordering, [1u64, 3, 1]);

        assert_eq!(scores.ranked(&ordering), vec![("b", 3), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn test_ranked_lists_each_node_once() {
        let ordering = NodeOrdering::from_nodes(["a", "b", "a"]);
        let scores = CentralityScores::from_positions(&ordering, [2.0, 1.0]);

        assert_eq!(scores.ranked(&ordering), vec![("a", 2.0), ("b", 1.0)]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let scores: CentralityScores<String, u64> = [("a".to_string(), 2)].into_iter().collect();
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"a":2}"#);
    }
}
