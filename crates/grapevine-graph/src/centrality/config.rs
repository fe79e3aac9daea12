//! Parameters shared by the measures, and a one-shot report of all four.

use super::{communication, decay, diffusion, godfather, CommunicationStrategy};
use crate::error::{CentralityError, Result};
use crate::graph::{NodeKey, SocialGraph};
use crate::scores::CentralityScores;
use petgraph::EdgeType;
use serde::{Deserialize, Serialize};

/// Centrality parameters, as stored in `.grapevine/config.json`.
///
/// Missing fields take their defaults: `p = 0.5`, `T = 2`, matrix-power
/// communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralityConfig {
    /// Per-hop decay factor `p` for decay centrality.
    pub decay_factor: f64,

    /// Number of relay periods `T`.
    pub horizon: u32,

    pub communication: CommunicationStrategy,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            decay_factor: 0.5,
            horizon: 2,
            communication: CommunicationStrategy::MatrixPower,
        }
    }
}

impl CentralityConfig {
    /// Parses a JSON config. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks parameters that no measure can work with.
    pub fn validate(&self) -> Result<()> {
        super::check_decay_factor(self.decay_factor)?;
        if let CommunicationStrategy::MonteCarlo { runs: 0, .. } = self.communication {
            return Err(CentralityError::InvalidParameter {
                name: "runs",
                reason: "at least one simulation run is required".to_string(),
            });
        }
        Ok(())
    }
}

/// All four measures for one graph.
#[derive(Debug, Clone, Serialize)]
pub struct CentralityReport<N: NodeKey + Serialize> {
    pub config: CentralityConfig,
    pub decay: CentralityScores<N>,
    pub communication: CentralityScores<N>,
    pub diffusion: CentralityScores<N>,
    pub godfather: CentralityScores<N, u64>,
}

/// Runs every measure with the parameters in `config`.
pub fn compute_all<N, Ty>(graph: &SocialGraph<N, Ty>, config: &CentralityConfig) -> Result<CentralityReport<N>>
where
    N: NodeKey + Serialize,
    Ty: EdgeType,
{
    config.validate()?;

    Ok(CentralityReport {
        config: config.clone(),
        decay: decay(graph, config.decay_factor, config.horizon)?,
        communication: communication(graph, config.horizon, &config.communication)?,
        diffusion: diffusion(graph, config.horizon)?,
        godfather: godfather(graph)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::UnSocialGraph;

    #[test]
    fn test_defaults_match_reference_parameters() {
        let config = CentralityConfig::default();
        assert_eq!(config.decay_factor, 0.5);
        assert_eq!(config.horizon, 2);
        assert_eq!(config.communication, CommunicationStrategy::MatrixPower);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CentralityConfig::from_json(r#"{"horizon": 4}"#).unwrap();
        assert_eq!(config.horizon, 4);
        assert_eq!(config.decay_factor, 0.5);
    }

    #[test]
    fn test_json_roundtrip_keeps_strategy() {
        let config = CentralityConfig {
            decay_factor: 0.8,
            horizon: 3,
            communication: CommunicationStrategy::MonteCarlo { runs: 50, seed: 9 },
        };
        let parsed = CentralityConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CentralityConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CentralityError::Config(_)));
    }

    #[test]
    fn test_zero_runs_rejected() {
        let json = r#"{"communication": {"strategy": "monte_carlo", "runs": 0, "seed": 1}}"#;
        let err = CentralityConfig::from_json(json).unwrap_err();
        assert!(matches!(err, CentralityError::InvalidParameter { name: "runs", .. }));
    }

    #[test]
    fn test_compute_all_on_star() {
        let graph = UnSocialGraph::from_edges(vec![("c", "x"), ("c", "y"), ("c", "z")]).unwrap();
        let report = compute_all(&graph, &CentralityConfig::default()).unwrap();

        assert_eq!(report.godfather.get(&"c"), Some(3));
        assert_eq!(report.diffusion.get(&"x"), Some(1.0 + 3.0));
        // P^2 row sum for a leaf: leaf -> c -> {x, y, z}
        assert_eq!(report.communication.get(&"x"), Some(3.0));
        // leaf: 2 within one hop, all 4 within two
        assert_eq!(report.decay.get(&"x"), Some(0.5 * 2.0 + 0.25 * 4.0));
    }
}
