//! Communication centrality: the expected number of nodes that ever hear
//! information started at a node.
//!
//! `Com_i(P, T) = Σ_j PInf(P, T)_ij`, where `PInf_ij` is the probability
//! that `j` hears information from `i` when every link relays it
//! independently each period. Two strategies are available:
//!
//! - [`CommunicationStrategy::MatrixPower`] takes row sums of `P^T`. It
//!   is fast but only a proxy: walk probabilities along overlapping paths
//!   are added instead of combined, so the result is not a probability
//!   sum and can exceed `n - 1`.
//! - [`CommunicationStrategy::MonteCarlo`] simulates the relay process
//!   and averages over many runs.

use super::ensure_finite;
use crate::adjacency::{matrix_power, row_sums, AdjacencyMatrix};
use crate::error::{CentralityError, Result};
use crate::graph::{NodeKey, SocialGraph};
use crate::scores::CentralityScores;
use petgraph::EdgeType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Default number of simulated runs per source node.
pub const DEFAULT_RUNS: usize = 1000;

/// Default seed for the simulation RNG.
pub const DEFAULT_SEED: u64 = 42;

/// How communication centrality is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CommunicationStrategy {
    /// Row sums of `P^T`. Approximate.
    #[default]
    MatrixPower,

    /// Independent-relay simulation, `runs` repetitions per source node,
    /// seeded for reproducibility.
    MonteCarlo { runs: usize, seed: u64 },
}

impl CommunicationStrategy {
    /// Simulation with default run count and seed.
    pub fn monte_carlo() -> Self {
        Self::MonteCarlo {
            runs: DEFAULT_RUNS,
            seed: DEFAULT_SEED,
        }
    }

    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatrixPower => "matrix_power",
            Self::MonteCarlo { .. } => "monte_carlo",
        }
    }
}

impl std::fmt::Display for CommunicationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatrixPower => write!(f, "matrix power (approximate)"),
            Self::MonteCarlo { runs, seed } => write!(f, "monte carlo ({} runs, seed {})", runs, seed),
        }
    }
}

/// Computes communication centrality with the chosen strategy.
///
/// With `MatrixPower` a horizon of 0 gives `P^0 = I`, so every node
/// scores exactly 1. With `MonteCarlo` a horizon of 0 relays nothing and
/// every node scores 0.
pub fn communication<N: NodeKey, Ty: EdgeType>(
    graph: &SocialGraph<N, Ty>,
    horizon: u32,
    strategy: &CommunicationStrategy,
) -> Result<CentralityScores<N>> {
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        horizon,
        strategy = strategy.as_str(),
        "computing communication centrality"
    );

    match *strategy {
        CommunicationStrategy::MatrixPower => matrix_power_scores(graph, horizon),
        CommunicationStrategy::MonteCarlo { runs, seed } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            communication_monte_carlo(graph, horizon, runs, &mut rng)
        }
    }
}

fn matrix_power_scores<N: NodeKey, Ty: EdgeType>(
    graph: &SocialGraph<N, Ty>,
    horizon: u32,
) -> Result<CentralityScores<N>> {
    let (ordering, transition) = AdjacencyMatrix::weighted(graph).into_parts();
    let powered = matrix_power(&transition, horizon);

    let scores = CentralityScores::from_vector(&ordering, &row_sums(&powered));
    ensure_finite("communication", &scores, &ordering)?;
    Ok(scores)
}

/// Estimates communication centrality by simulation.
///
/// For each source node and each of `runs` repetitions, the source starts
/// informed. In every one of `horizon` periods each informed node tries
/// each of its out-links once, succeeding with probability
/// `min(P[u, j], 1)`. Nodes informed during a period start relaying in
/// the next one. A node's score is the sum over other nodes of the
/// fraction of runs in which they were informed, so it lies in
/// `[0, n - 1]`.
///
/// The caller owns the random source; the same RNG state gives the same
/// result.
pub fn communication_monte_carlo<N: NodeKey, Ty: EdgeType, R: Rng + ?Sized>(
    graph: &SocialGraph<N, Ty>,
    horizon: u32,
    runs: usize,
    rng: &mut R,
) -> Result<CentralityScores<N>> {
    if runs == 0 {
        return Err(CentralityError::InvalidParameter {
            name: "runs",
            reason: "at least one simulation run is required".to_string(),
        });
    }

    let adjacency = AdjacencyMatrix::weighted(graph);
    let n = adjacency.len();

    let mut clamped = 0usize;
    let links: Vec<Vec<(usize, f64)>> = (0..n)
        .map(|i| {
            adjacency
                .out_links(i)
                .into_iter()
                .filter(|(_, weight)| *weight > 0.0)
                .map(|(j, weight)| {
                    if weight > 1.0 {
                        clamped += 1;
                    }
                    (j, weight.min(1.0))
                })
                .collect()
        })
        .collect();
    if clamped > 0 {
        tracing::warn!(
            clamped,
            "transition weights above 1 treated as certain relay"
        );
    }

    let mut values = Vec::with_capacity(n);
    let mut informed = vec![false; n];
    let mut order: Vec<usize> = Vec::with_capacity(n);

    for source in 0..n {
        let mut hearings = 0usize;
        for _ in 0..runs {
            hearings += simulate_run(&links, source, horizon, rng, &mut informed, &mut order);
        }
        values.push(hearings as f64 / runs as f64);
    }

    let scores = CentralityScores::from_positions(adjacency.ordering(), values);
    ensure_finite("communication", &scores, adjacency.ordering())?;
    Ok(scores)
}

/// One relay run from `source`. Returns how many nodes other than the
/// source were informed. `informed` and `order` are scratch buffers.
fn simulate_run<R: Rng + ?Sized>(
    links: &[Vec<(usize, f64)>],
    source: usize,
    horizon: u32,
    rng: &mut R,
    informed: &mut [bool],
    order: &mut Vec<usize>,
) -> usize {
    informed.fill(false);
    order.clear();

    informed[source] = true;
    order.push(source);

    for _ in 0..horizon {
        // only nodes informed before this period relay
        let relaying = order.len();
        for position in 0..relaying {
            let u = order[position];
            for &(j, probability) in &links[u] {
                if !informed[j] && rng.gen::<f64>() < probability {
                    informed[j] = true;
                    order.push(j);
                }
            }
        }
        if order.len() == links.len() {
            break;
        }
    }

    order.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiSocialGraph, UnSocialGraph};

    fn seeded() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_zero_horizon_is_identity_row_sums() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1, 0.4), (1, 2, 0.9)]).unwrap();
        let scores = communication(&graph, 0, &CommunicationStrategy::MatrixPower).unwrap();

        for node in 0..3 {
            assert_eq!(scores.get(&node), Some(1.0));
        }
    }

    #[test]
    fn test_matrix_power_uses_final_power_only() {
        // a -> b -> c
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.5), ("b", "c", 0.5)]).unwrap();
        let scores = communication(&graph, 2, &CommunicationStrategy::MatrixPower).unwrap();

        assert_eq!(scores.get(&"a"), Some(0.25));
        assert_eq!(scores.get(&"b"), Some(0.0));
        assert_eq!(scores.get(&"c"), Some(0.0));
    }

    #[test]
    fn test_matrix_power_directed_cycle() {
        let graph = DiSocialGraph::from_edges(vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let scores = communication(&graph, 3, &CommunicationStrategy::MatrixPower).unwrap();
        for node in 0..4 {
            assert_eq!(scores.get(&node), Some(1.0));
        }
    }

    #[test]
    fn test_monte_carlo_certain_links_reach_everyone_in_range() {
        // 0 - 1 - 2 - 3 with certain relay
        let graph = UnSocialGraph::from_edges(vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let scores = communication_monte_carlo(&graph, 2, 10, &mut seeded()).unwrap();

        assert_eq!(scores.get(&0), Some(2.0));
        assert_eq!(scores.get(&1), Some(3.0));
        assert_eq!(scores.get(&3), Some(2.0));
    }

    #[test]
    fn test_monte_carlo_zero_horizon_hears_nothing() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1), (1, 2)]).unwrap();
        let scores = communication_monte_carlo(&graph, 0, 5, &mut seeded()).unwrap();
        assert!(scores.iter().all(|(_, score)| *score == 0.0));
    }

    #[test]
    fn test_monte_carlo_zero_probability_never_relays() {
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.0)]).unwrap();
        let scores = communication_monte_carlo(&graph, 3, 50, &mut seeded()).unwrap();
        assert_eq!(scores.get(&"a"), Some(0.0));
    }

    #[test]
    fn test_monte_carlo_weight_above_one_always_relays() {
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 2.0), ("b", "c", 1.5)]).unwrap();
        let scores = communication_monte_carlo(&graph, 2, 500, &mut seeded()).unwrap();

        assert_eq!(scores.get(&"a"), Some(2.0));
        assert_eq!(scores.get(&"b"), Some(1.0));
        assert_eq!(scores.get(&"c"), Some(0.0));
    }

    #[test]
    fn test_monte_carlo_approximates_single_link_probability() {
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.3)]).unwrap();
        let scores = communication_monte_carlo(&graph, 1, 20_000, &mut seeded()).unwrap();

        let estimate = scores.get(&"a").unwrap();
        assert!((estimate - 0.3).abs() < 0.02, "estimate {} too far from 0.3", estimate);
    }

    #[test]
    fn test_monte_carlo_repeated_periods_compound() {
        // Each period the informed source tries again: 1 - (1 - p)^T.
        let graph = DiSocialGraph::from_edges(vec![("a", "b", 0.5)]).unwrap();
        let scores = communication_monte_carlo(&graph, 3, 20_000, &mut seeded()).unwrap();

        let estimate = scores.get(&"a").unwrap();
        assert!((estimate - 0.875).abs() < 0.02, "estimate {} too far from 0.875", estimate);
    }

    #[test]
    fn test_seeded_strategy_is_reproducible() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1, 0.3), (1, 2, 0.6), (2, 0, 0.5), (2, 3, 0.2)]).unwrap();
        let strategy = CommunicationStrategy::MonteCarlo { runs: 200, seed: 11 };

        let first = communication(&graph, 3, &strategy).unwrap();
        let second = communication(&graph, 3, &strategy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_runs_rejected() {
        let graph = UnSocialGraph::from_edges(vec![(0, 1)]).unwrap();
        let err = communication_monte_carlo(&graph, 2, 0, &mut seeded()).unwrap_err();
        assert!(matches!(err, CentralityError::InvalidParameter { name: "runs", .. }));
    }

    #[test]
    fn test_strategy_serde_shape() {
        let json = serde_json::to_string(&CommunicationStrategy::MonteCarlo { runs: 10, seed: 3 }).unwrap();
        assert_eq!(json, r#"{"strategy":"monte_carlo","runs":10,"seed":3}"#);

        let parsed: CommunicationStrategy = serde_json::from_str(r#"{"strategy":"matrix_power"}"#).unwrap();
        assert_eq!(parsed, CommunicationStrategy::MatrixPower);
    }
}
