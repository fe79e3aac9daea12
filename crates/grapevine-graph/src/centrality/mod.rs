//! Centrality measures from Jackson's decomposition of social capital.
//!
//! Four independent measures over the same read-only graph:
//! - [`decay`]: reach within `T` hops, discounted per hop
//! - [`communication`]: expected number of nodes ever informed
//! - [`diffusion`]: expected number of hearings over `T` rounds
//! - [`godfather`]: pairs of friends who are not friends themselves
//!
//! Each call builds its own node ordering and matrices and discards them
//! on return.

mod communication;
mod config;
mod decay;
mod diffusion;
mod godfather;

pub use communication::{
    communication, communication_monte_carlo, CommunicationStrategy, DEFAULT_RUNS, DEFAULT_SEED,
};
pub use config::{compute_all, CentralityConfig, CentralityReport};
pub use decay::decay;
pub use diffusion::diffusion;
pub use godfather::{godfather, godfather_naive};

use crate::adjacency::NodeOrdering;
use crate::error::{CentralityError, Result};
use crate::graph::NodeKey;
use crate::scores::CentralityScores;

/// Rejects a non-finite decay factor and warns about one outside (0, 1].
pub(crate) fn check_decay_factor(p: f64) -> Result<()> {
    if !p.is_finite() {
        return Err(CentralityError::InvalidParameter {
            name: "p",
            reason: format!("decay factor must be finite, got {}", p),
        });
    }
    if p <= 0.0 || p > 1.0 {
        tracing::warn!(p, "decay factor outside (0, 1]; scores will not discount with distance");
    }
    Ok(())
}

pub(crate) fn ensure_finite<N: NodeKey>(
    measure: &'static str,
    scores: &CentralityScores<N>,
    ordering: &NodeOrdering<N>,
) -> Result<()> {
    match scores.first_non_finite(ordering) {
        Some(node) => Err(CentralityError::NonFinite {
            measure,
            node: format!("{:?}", node),
        }),
        None => Ok(()),
    }
}
