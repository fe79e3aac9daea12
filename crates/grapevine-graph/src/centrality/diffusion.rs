//! Diffusion centrality: the expected number of hearings.
//!
//! `Diff_i(P, T) = Σ_j Σ_{l=1..T} [P^l]_ij`. Unlike communication
//! centrality this sums every horizon, so repeated hearings along
//! distinct walks all count.

use super::ensure_finite;
use crate::adjacency::{row_sums, AdjacencyMatrix};
use crate::error::Result;
use crate::graph::{NodeKey, SocialGraph};
use crate::scores::CentralityScores;
use ndarray::{Array1, Array2};
use petgraph::EdgeType;

/// Computes diffusion centrality over `horizon` relay rounds.
///
/// A horizon of 0 gives all zeros. No clamping is applied: weights above
/// 1 or dense graphs can overflow for long horizons, which is reported
/// as [`CentralityError::NonFinite`](crate::CentralityError::NonFinite).
pub fn diffusion<N: NodeKey, Ty: EdgeType>(
    graph: &SocialGraph<N, Ty>,
    horizon: u32,
) -> Result<CentralityScores<N>> {
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        horizon,
        "computing diffusion centrality"
    );

    let (ordering, transition) = AdjacencyMatrix::weighted(graph).into_parts();
    let n = ordering.len();

    let mut total = Array1::<f64>::zeros(n);
    let mut power = Array2::<f64>::eye(n);
    for l in 1..=horizon {
        power = power.dot(&transition);
        total += &row_sums(&power);
        tracing::trace!(step = l, "accumulated walk counts");
    }

    let scores = CentralityScores::from_vector(&ordering, &total);
    ensure_finite("diffusion", &scores, &ordering)?;
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CentralityError;
    use crate::graph::{DiSocialGraph, UnSocialGraph};

    #[test]
    fn test_zero_horizon_scores_zero() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1), (1, 2)]).unwrap();
        let scores = diffusion(&graph, 0).unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|(_, score)| *score == 0.0));
    }

    #[test]
    fn test_single_round_is_out_degree() {
        let graph = DiSocialGraph::from_edges(vec![(0, 1), (0, 2), (0, 3), (1, 2), (3, 0)]).unwrap();
        let scores = diffusion(&graph, 1).unwrap();

        assert_eq!(scores.get(&0), Some(3.0));
        assert_eq!(scores.get(&1), Some(1.0));
        assert_eq!(scores.get(&2), Some(0.0));
        assert_eq!(scores.get(&3), Some(1.0));
    }

    #[test]
    fn test_undirected_single_round_is_degree() {
        let graph = UnSocialGraph::from_edges(vec![("hub", "a"), ("hub", "b"), ("a", "b"), ("b", "c")]).unwrap();
        let scores = diffusion(&graph, 1).unwrap();

        assert_eq!(scores.get(&"hub"), Some(2.0));
        assert_eq!(scores.get(&"b"), Some(3.0));
        assert_eq!(scores.get(&"c"), Some(1.0));
    }

    #[test]
    fn test_directed_four_cycle() {
        let graph = DiSocialGraph::from_edges(vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let scores = diffusion(&graph, 2).unwrap();

        for node in 0..4 {
            assert_eq!(scores.get(&node), Some(2.0));
        }
    }

    #[test]
    fn test_sums_every_horizon() {
        // a -> b -> c with relay probability 0.5
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.5), ("b", "c", 0.5)]).unwrap();
        let scores = diffusion(&graph, 3).unwrap();

        assert_eq!(scores.get(&"a"), Some(0.5 + 0.25));
        assert_eq!(scores.get(&"b"), Some(0.5));
        assert_eq!(scores.get(&"c"), Some(0.0));
    }

    #[test]
    fn test_overflow_is_reported() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1, 1e200), (1, 2, 1e200)]).unwrap();
        let err = diffusion(&graph, 3).unwrap_err();
        assert!(matches!(err, CentralityError::NonFinite { measure: "diffusion", .. }));
    }

    #[test]
    fn test_repeatable() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1, 0.3), (1, 2, 0.9), (2, 0, 0.4), (2, 3, 0.7)]).unwrap();
        assert_eq!(diffusion(&graph, 4).unwrap(), diffusion(&graph, 4).unwrap());
    }
}
