//! Decay centrality.
//!
//! `Dec_i(g, p, T) = Σ_{l=1..T} p^l · |N_i^l(g)|`, where `|N_i^l|` counts
//! the nodes within `l` hops of `i`, `i` included. Edge weights play no
//! part; only the hop structure matters.

use super::{check_decay_factor, ensure_finite};
use crate::adjacency::NodeOrdering;
use crate::error::Result;
use crate::graph::{NodeKey, SocialGraph};
use crate::scores::CentralityScores;
use petgraph::EdgeType;
use std::collections::VecDeque;

/// Computes decay centrality for every node.
///
/// A horizon of 0 gives every node a score of 0. Hop counts follow
/// successors in a directed graph and all links in an undirected one.
/// `p` outside (0, 1] is accepted but logged; it has no sensible
/// interpretation as a per-hop decay.
pub fn decay<N: NodeKey, Ty: EdgeType>(
    graph: &SocialGraph<N, Ty>,
    p: f64,
    horizon: u32,
) -> Result<CentralityScores<N>> {
    check_decay_factor(p)?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        p,
        horizon,
        "computing decay centrality"
    );

    let ordering = NodeOrdering::of(graph);
    let neighbors = graph.neighbor_lists();
    // no shortest path is longer than n - 1 hops
    let searched = (horizon as usize).min(neighbors.len());

    let values = (0..ordering.len()).map(|source| {
        let within = reach_counts(&neighbors, source, searched);
        let explored: f64 = (1..=searched)
            .map(|l| p.powf(l as f64) * within[l] as f64)
            .sum();
        let saturated = within[searched] as f64 * geometric_sum(p, searched as u64 + 1, u64::from(horizon));
        explored + saturated
    });

    let scores = CentralityScores::from_positions(&ordering, values.collect::<Vec<_>>());
    ensure_finite("decay", &scores, &ordering)?;
    Ok(scores)
}

/// `Σ p^l` for `l` in `first..=last`; zero when the range is empty.
fn geometric_sum(p: f64, first: u64, last: u64) -> f64 {
    if first > last {
        return 0.0;
    }
    if p == 1.0 {
        return (last - first + 1) as f64;
    }
    (p.powf(first as f64) - p.powf(last as f64 + 1.0)) / (1.0 - p)
}

/// `counts[l]` is the number of nodes at shortest-path distance at most
/// `l` from `source`, for `l` in `0..=cutoff`.
///
/// One BFS per source is enough: the cutoff only changes which distances
/// are counted, not the search itself.
fn reach_counts(neighbors: &[Vec<usize>], source: usize, cutoff: usize) -> Vec<usize> {
    let mut at_distance = vec![0usize; cutoff + 1];
    let mut distance: Vec<Option<usize>> = vec![None; neighbors.len()];
    let mut queue = VecDeque::new();

    distance[source] = Some(0);
    at_distance[0] = 1;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let depth = distance[current].unwrap_or(0);
        if depth == cutoff {
            continue;
        }
        for &next in &neighbors[current] {
            if distance[next].is_none() {
                distance[next] = Some(depth + 1);
                at_distance[depth + 1] += 1;
                queue.push_back(next);
            }
        }
    }

    // cumulative: nodes within l hops, not exactly l
    for l in 1..=cutoff {
        at_distance[l] += at_distance[l - 1];
    }
    at_distance
}
