//! Edge-list loading.
//!
//! One edge per line: `source target [weight]`, whitespace separated.
//! Lines starting with `#` and blank lines are skipped. Node ids are
//! kept as strings.

use grapevine_graph::{EdgeType, GraphError, SocialGraph, WeightedEdge};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Reads an edge-list file into a graph.
pub fn load_edge_list<Ty: EdgeType>(path: &Path) -> Result<SocialGraph<String, Ty>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let graph = parse_edge_list(&text)?;

    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded edge list"
    );
    Ok(graph)
}

/// Parses edge-list text into a graph.
pub fn parse_edge_list<Ty: EdgeType>(text: &str) -> Result<SocialGraph<String, Ty>, LoadError> {
    let mut edges = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        edges.push(parse_line(line, number + 1)?);
    }

    Ok(SocialGraph::from_edges(edges)?)
}

fn parse_line(line: &str, number: usize) -> Result<WeightedEdge<String>, LoadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let weight = match fields.as_slice() {
        [_, _] => None,
        [_, _, weight] => Some(weight.parse::<f64>().map_err(|_| LoadError::Parse {
            line: number,
            reason: format!("invalid weight '{}'", weight),
        })?),
        _ => {
            return Err(LoadError::Parse {
                line: number,
                reason: format!("expected 'source target [weight]', got {} fields", fields.len()),
            })
        }
    };

    Ok(WeightedEdge::new(fields[0].to_string(), fields[1].to_string(), weight))
}
