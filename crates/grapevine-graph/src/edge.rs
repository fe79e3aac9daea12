//! Edge types for the social graph.
//!
//! Edges carry a single scalar: the per-period relay weight. For the
//! unweighted networks most measures run on, that weight is 1.0.

use serde::{Deserialize, Serialize};

/// Weight given to an edge declared without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A flattened edge for export and for feeding the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge<N> {
    pub source: N,
    pub target: N,
    pub weight: f64,
}

impl<N> WeightedEdge<N> {
    /// Creates an edge, falling back to [`DEFAULT_WEIGHT`] when no weight is given.
    pub fn new(source: N, target: N, weight: Option<f64>) -> Self {
        Self {
            source,
            target,
            weight: weight.unwrap_or(DEFAULT_WEIGHT),
        }
    }

    /// Creates an edge with the default weight.
    pub fn unweighted(source: N, target: N) -> Self {
        Self::new(source, target, None)
    }
}

impl<N> From<(N, N)> for WeightedEdge<N> {
    fn from((source, target): (N, N)) -> Self {
        Self::unweighted(source, target)
    }
}

impl<N> From<(N, N, f64)> for WeightedEdge<N> {
    fn from((source, target, weight): (N, N, f64)) -> Self {
        Self::new(source, target, Some(weight))
    }
}

impl<N> From<(N, N, Option<f64>)> for WeightedEdge<N> {
    fn from((source, target, weight): (N, N, Option<f64>)) -> Self {
        Self::new(source, target, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let edge = WeightedEdge::new("a", "b", None);
        assert_eq!(edge.weight, 1.0);

        let edge: WeightedEdge<_> = ("a", "b", 0.25).into();
        assert_eq!(edge.weight, 0.25);
    }
}
