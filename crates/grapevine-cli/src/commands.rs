//! CLI command implementations.

use crate::loader::load_edge_list;
use crate::settings::{self, Overrides, CONFIG_DIR};
use colored::Colorize;
use grapevine_graph::{
    communication, compute_all, decay, diffusion, godfather, CentralityConfig, CentralityScores,
    CommunicationStrategy, Directed, EdgeType, NodeOrdering, SocialGraph, Undirected,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// The four measures, one per subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Decay,
    Communication,
    Diffusion,
    Godfather,
}

impl Measure {
    pub fn title(&self) -> &'static str {
        match self {
            Measure::Decay => "Decay centrality",
            Measure::Communication => "Communication centrality",
            Measure::Diffusion => "Diffusion centrality",
            Measure::Godfather => "Godfather index",
        }
    }
}

/// Where the graph comes from and how to print results.
pub struct Input<'a> {
    pub edges: &'a Path,
    pub directed: bool,
    pub config: Option<&'a Path>,
    pub top: usize,
    pub json: bool,
}

/// Initialize Grapevine in a directory.
pub fn init(path: &Path) -> Result<()> {
    let config_path = settings::config_path(path);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(path.join(CONFIG_DIR))?;
    fs::write(&config_path, CentralityConfig::default().to_json_pretty()?)?;

    println!("{} Initialized Grapevine in {}", "✓".green(), path.display());
    println!("  Edit {} to change p, T or the communication strategy", config_path.display().to_string().cyan());

    Ok(())
}

/// Show graph statistics.
pub fn stats(input: &Input) -> Result<()> {
    if input.directed {
        print_stats::<Directed>(input)
    } else {
        print_stats::<Undirected>(input)
    }
}

fn print_stats<Ty: EdgeType>(input: &Input) -> Result<()> {
    let graph = load_edge_list::<Ty>(input.edges)?;
    let stats = graph.stats();

    if input.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Graph".cyan().bold());
    println!("  Nodes:      {}", stats.node_count.to_string().cyan());
    println!("  Edges:      {}", stats.edge_count.to_string().cyan());
    println!("  Directed:   {}", stats.directed);
    println!("  Self-loops: {}", stats.self_loops);
    println!("  Isolated:   {}", stats.isolated);
    if stats.self_loops > 0 {
        println!(
            "\n{} Godfather ignores self-loops; the other measures count them as links",
            "⚠".yellow()
        );
    }

    Ok(())
}

/// Compute one measure and print the top-ranked nodes.
pub fn measure(kind: Measure, input: &Input, overrides: &Overrides) -> Result<()> {
    if input.directed {
        run_measure::<Directed>(kind, input, overrides)
    } else {
        run_measure::<Undirected>(kind, input, overrides)
    }
}

fn run_measure<Ty: EdgeType>(kind: Measure, input: &Input, overrides: &Overrides) -> Result<()> {
    let config = settings::resolve(input.config, &std::env::current_dir()?, overrides)?;
    let graph = load_edge_list::<Ty>(input.edges)?;
    let ordering = NodeOrdering::of(&graph);
    let start = Instant::now();

    match kind {
        Measure::Decay => {
            let scores = decay(&graph, config.decay_factor, config.horizon)?;
            print_ranked(kind, &format!("p = {}, T = {}", config.decay_factor, config.horizon), &scores, &ordering, input)?;
        }
        Measure::Communication => {
            let spinner = simulation_spinner(&config.communication)?;
            let scores = communication(&graph, config.horizon, &config.communication);
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let params = format!("T = {}, {}", config.horizon, config.communication);
            print_ranked(kind, &params, &scores?, &ordering, input)?;
        }
        Measure::Diffusion => {
            let scores = diffusion(&graph, config.horizon)?;
            print_ranked(kind, &format!("T = {}", config.horizon), &scores, &ordering, input)?;
        }
        Measure::Godfather => {
            let scores = godfather(&graph)?;
            print_ranked(kind, "", &scores, &ordering, input)?;
        }
    }

    tracing::debug!(measure = kind.title(), elapsed_ms = start.elapsed().as_millis() as u64, "done");
    Ok(())
}

/// Compute every measure and print a combined table.
pub fn all(input: &Input, overrides: &Overrides) -> Result<()> {
    if input.directed {
        run_all::<Directed>(input, overrides)
    } else {
        run_all::<Undirected>(input, overrides)
    }
}

fn run_all<Ty: EdgeType>(input: &Input, overrides: &Overrides) -> Result<()> {
    let config = settings::resolve(input.config, &std::env::current_dir()?, overrides)?;
    let graph: SocialGraph<String, Ty> = load_edge_list(input.edges)?;

    let spinner = simulation_spinner(&config.communication)?;
    let report = compute_all(&graph, &config);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = report?;

    if input.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} (p = {}, T = {}, communication: {})\n",
        "All measures".cyan().bold(),
        config.decay_factor,
        config.horizon,
        config.communication
    );
    println!(
        "  {:<20} {:>12} {:>14} {:>12} {:>10}",
        "node", "decay", "communication", "diffusion", "godfather"
    );

    let ordering = NodeOrdering::of(&graph);
    let ranked = report.diffusion.ranked(&ordering);
    for (node, diffusion) in ranked.iter().take(input.top) {
        println!(
            "  {:<20} {:>12.4} {:>14.4} {:>12.4} {:>10}",
            node.cyan(),
            report.decay.get(node).unwrap_or_default(),
            report.communication.get(node).unwrap_or_default(),
            diffusion,
            report.godfather.get(node).unwrap_or_default()
        );
    }
    print_truncation(ranked.len(), input.top);

    Ok(())
}

fn print_ranked<S>(
    kind: Measure,
    params: &str,
    scores: &CentralityScores<String, S>,
    ordering: &NodeOrdering<String>,
    input: &Input,
) -> Result<()>
where
    S: Copy + PartialOrd + Display + Serialize,
{
    let ranked = scores.ranked(ordering);

    if input.json {
        let rows: Vec<_> = ranked
            .iter()
            .take(input.top)
            .map(|(node, score)| serde_json::json!({ "node": node, "score": score }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if params.is_empty() {
        println!("{}\n", kind.title().cyan().bold());
    } else {
        println!("{} ({})\n", kind.title().cyan().bold(), params);
    }

    for (rank, (node, score)) in ranked.iter().take(input.top).enumerate() {
        println!("  {:>3}. {:<24} {}", rank + 1, node.cyan(), score.to_string().yellow());
    }
    print_truncation(ranked.len(), input.top);

    Ok(())
}

fn print_truncation(total: usize, shown: usize) {
    if total > shown {
        println!("  ... and {} more", total - shown);
    }
}

fn simulation_spinner(strategy: &CommunicationStrategy) -> Result<Option<ProgressBar>> {
    let CommunicationStrategy::MonteCarlo { runs, .. } = strategy else {
        return Ok(None);
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Simulating {} relay runs per node...", runs));
    Ok(Some(spinner))
}
