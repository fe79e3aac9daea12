//! Error types for graph construction and centrality computation.

use thiserror::Error;

/// Malformed graph input. Raised before any matrix is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("Edge {from} -> {target} has non-finite weight {weight}")]
    InvalidWeight {
        from: String,
        target: String,
        weight: f64,
    },
}

/// Failure of a centrality computation.
#[derive(Error, Debug)]
pub enum CentralityError {
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{measure} centrality produced a non-finite score for node {node}")]
    NonFinite { measure: &'static str, node: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CentralityError>;
