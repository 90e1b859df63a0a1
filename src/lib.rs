//! Graph Stepper - replayable step sequences for classic graph algorithms
//!
//! This library computes the full, step-by-step state sequence underlying
//! Dijkstra single-source shortest paths, Floyd-Warshall all-pairs shortest
//! paths, Warshall transitive closure, and Kruskal minimum spanning trees.
//!
//! Each algorithm run eagerly produces an immutable [`trace::StepSequence`]:
//! step 0 is the initial state, every later step captures the state at the
//! end of one iteration together with the entries that changed (or were
//! examined and did not change). Callers navigate the sequence by index and
//! render it however they like; nothing here draws or prints.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod trace;

pub use algorithm::{
    dijkstra::DijkstraStepper,
    floyd_warshall::{reconstruct_path, FloydWarshallStepper},
    kruskal::KruskalStepper,
    run_dijkstra, run_floyd_warshall, run_kruskal, run_warshall,
    warshall::WarshallStepper,
    SteppedAlgorithm,
};
/// Re-export main types for convenient use
pub use graph::{Edge, Graph, NodeId};
pub use trace::{Change, Step, StepAction, StepSequence};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("node '{0}' is already present in the graph")]
    DuplicateNode(NodeId),

    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),

    #[error("invalid edge weight {0}: weights must be finite and non-negative")]
    InvalidWeight(f64),

    #[error("source node '{0}' not found in graph")]
    UnknownSource(NodeId),

    #[error("negative edge weight {weight} on edge {from} -> {to}")]
    NegativeWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    #[error("Kruskal requires an undirected graph, found directed edge {0} -> {1}")]
    RequiresUndirected(NodeId, NodeId),

    #[error("step index {index} out of range for sequence of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no path exists from '{0}' to '{1}'")]
    NoPath(NodeId, NodeId),

    #[error("path reconstruction from '{0}' to '{1}' failed: inconsistent path matrix")]
    PathReconstructionFailed(NodeId, NodeId),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
