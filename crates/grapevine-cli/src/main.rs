//! Grapevine CLI - Command-line interface for Grapevine
//!
//! Loads an edge list and reports who is best placed to spread
//! information or broker between others.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod loader;
mod settings;

use commands::{Input, Measure};
use settings::Overrides;

#[derive(Parser)]
#[command(name = "grapevine")]
#[command(author = "Grapevine Contributors")]
#[command(version)]
#[command(about = "Information and brokerage centrality for social networks", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Graph input and output options shared by every analysis command.
#[derive(Args)]
struct InputArgs {
    /// Edge list: one `source target [weight]` per line
    edges: PathBuf,

    /// Treat edges as one-way
    #[arg(long)]
    directed: bool,

    /// Config file (defaults to ./.grapevine/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of top-ranked nodes to show
    #[arg(long, default_value = "10")]
    top: usize,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl InputArgs {
    fn as_input(&self) -> Input<'_> {
        Input {
            edges: &self.edges,
            directed: self.directed,
            config: self.config.as_deref(),
            top: self.top,
            json: self.json,
        }
    }
}

/// Relay horizon shared by the walk-based measures.
#[derive(Args)]
struct HorizonArgs {
    /// Number of relay periods T
    #[arg(short = 'T', long)]
    horizon: Option<u32>,
}

/// Communication strategy options.
#[derive(Args)]
struct SimulationArgs {
    /// Simulate independent relays instead of the matrix-power approximation
    #[arg(long)]
    monte_carlo: bool,

    /// Simulation runs per source node (implies --monte-carlo)
    #[arg(long)]
    runs: Option<usize>,

    /// Simulation seed (implies --monte-carlo)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Grapevine in the current directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show graph statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Reach within T hops, discounted by p per hop
    Decay {
        #[command(flatten)]
        input: InputArgs,

        /// Per-hop decay factor p, in (0, 1]
        #[arg(short = 'p', long)]
        decay_factor: Option<f64>,

        #[command(flatten)]
        horizon: HorizonArgs,
    },

    /// Expected number of nodes that ever hear from each node
    Communication {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        horizon: HorizonArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Expected number of hearings over T periods
    Diffusion {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        horizon: HorizonArgs,
    },

    /// Pairs of a node's friends who are not friends themselves
    Godfather {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Run every measure and print a combined table
    All {
        #[command(flatten)]
        input: InputArgs,

        /// Per-hop decay factor p, in (0, 1]
        #[arg(short = 'p', long)]
        decay_factor: Option<f64>,

        #[command(flatten)]
        horizon: HorizonArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Stats { input } => commands::stats(&input.as_input()),
        Commands::Decay {
            input,
            decay_factor,
            horizon,
        } => {
            let overrides = Overrides {
                decay_factor,
                horizon: horizon.horizon,
                ..Overrides::default()
            };
            commands::measure(Measure::Decay, &input.as_input(), &overrides)
        }
        Commands::Communication {
            input,
            horizon,
            simulation,
        } => {
            let overrides = Overrides {
                horizon: horizon.horizon,
                monte_carlo: simulation.monte_carlo,
                runs: simulation.runs,
                seed: simulation.seed,
                ..Overrides::default()
            };
            commands::measure(Measure::Communication, &input.as_input(), &overrides)
        }
        Commands::Diffusion { input, horizon } => {
            let overrides = Overrides {
                horizon: horizon.horizon,
                ..Overrides::default()
            };
            commands::measure(Measure::Diffusion, &input.as_input(), &overrides)
        }
        Commands::Godfather { input } => {
            commands::measure(Measure::Godfather, &input.as_input(), &Overrides::default())
        }
        Commands::All {
            input,
            decay_factor,
            horizon,
            simulation,
        } => {
            let overrides = Overrides {
                decay_factor,
                horizon: horizon.horizon,
                monte_carlo: simulation.monte_carlo,
                runs: simulation.runs,
                seed: simulation.seed,
            };
            commands::all(&input.as_input(), &overrides)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
