//! Resolves the centrality parameters for a run.
//!
//! Precedence, lowest first: built-in defaults, the project config file
//! (`--config` or `./.grapevine/config.json`), then command-line flags.

use grapevine_graph::{CentralityConfig, CommunicationStrategy, DEFAULT_RUNS, DEFAULT_SEED};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project-local settings.
pub const CONFIG_DIR: &str = ".grapevine";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Parameter values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub decay_factor: Option<f64>,
    pub horizon: Option<u32>,
    pub monte_carlo: bool,
    pub runs: Option<usize>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Applies these overrides on top of `config`.
    ///
    /// `--runs` or `--seed` imply `--monte-carlo`. Values not given keep
    /// the file's simulation settings, then the defaults.
    pub fn apply(&self, mut config: CentralityConfig) -> CentralityConfig {
        if let Some(p) = self.decay_factor {
            config.decay_factor = p;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }

        if self.monte_carlo || self.runs.is_some() || self.seed.is_some() {
            let (file_runs, file_seed) = match config.communication {
                CommunicationStrategy::MonteCarlo { runs, seed } => (runs, seed),
                CommunicationStrategy::MatrixPower => (DEFAULT_RUNS, DEFAULT_SEED),
            };
            config.communication = CommunicationStrategy::MonteCarlo {
                runs: self.runs.unwrap_or(file_runs),
                seed: self.seed.unwrap_or(file_seed),
            };
        }
        config
    }
}

/// Path of the project config under `root`.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Loads the config file: `explicit` if given, else the project config
/// under `root` if it exists, else the defaults.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<CentralityConfig, Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path(root);
            if !path.exists() {
                tracing::debug!("no project config found, using defaults");
                return Ok(CentralityConfig::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config = CentralityConfig::from_json(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Loads the config and applies command-line overrides, validating the result.
pub fn resolve(
    explicit: Option<&Path>,
    root: &Path,
    overrides: &Overrides,
) -> Result<CentralityConfig, Box<dyn std::error::Error>> {
    let config = overrides.apply(load_config(explicit, root)?);
    config.validate()?;
    Ok(config)
}
