//! Grapevine Graph - information centrality for social networks
//!
//! This crate holds a weighted social graph and the diffusion-style
//! centrality measures defined over it: decay, communication and
//! diffusion centrality, and the Godfather brokerage index.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with an identifier index for
//! lookups by the caller's own node keys. Matrix measures derive a dense
//! `ndarray` matrix per call from the graph's canonical node ordering.
//!
//! # Example
//!
//! ```
//! use grapevine_graph::{diffusion, godfather, UnSocialGraph};
//!
//! let graph = UnSocialGraph::from_edges(vec![("ana", "ben"), ("ana", "cai")]).unwrap();
//!
//! let brokerage = godfather(&graph).unwrap();
//! assert_eq!(brokerage.get(&"ana"), Some(1));
//!
//! let hearings = diffusion(&graph, 1).unwrap();
//! assert_eq!(hearings.get(&"ana"), Some(2.0));
//! ```

mod adjacency;
mod builder;
mod centrality;
mod edge;
mod error;
mod graph;
mod scores;

pub use adjacency::{matrix_power, row_sums, AdjacencyMatrix, NodeOrdering};
pub use builder::GraphBuilder;
pub use centrality::{
    communication, communication_monte_carlo, compute_all, decay, diffusion, godfather,
    godfather_naive, CentralityConfig, CentralityReport, CommunicationStrategy, DEFAULT_RUNS,
    DEFAULT_SEED,
};
pub use edge::{WeightedEdge, DEFAULT_WEIGHT};
pub use error::{CentralityError, GraphError, Result};
pub use graph::{DiSocialGraph, GraphStats, NodeKey, SocialGraph, UnSocialGraph};
pub use scores::CentralityScores;

pub use petgraph::{Directed, EdgeType, Undirected};
