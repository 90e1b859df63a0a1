pub mod dijkstra;
pub mod floyd_warshall;
pub mod kruskal;
pub mod traits;
pub mod warshall;

use std::fmt::Debug;

use num_traits::{Float, Zero};

pub use traits::SteppedAlgorithm;

use crate::graph::{Graph, NodeId};
use crate::Result;

use dijkstra::{DijkstraStepper, DijkstraSteps};
use floyd_warshall::{FloydSteps, FloydWarshallStepper};
use kruskal::{KruskalStepper, KruskalSteps};
use warshall::{WarshallStepper, WarshallSteps};

/// Runs Dijkstra from `source` and returns the full step sequence
pub fn run_dijkstra<W>(graph: &Graph<W>, source: impl Into<NodeId>) -> Result<DijkstraSteps<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    DijkstraStepper::new(source).run(graph)
}

/// Runs Floyd-Warshall and returns the full step sequence
pub fn run_floyd_warshall<W>(graph: &Graph<W>) -> Result<FloydSteps<W>>
where
    W: Float + Zero + Debug + Copy,
{
    FloydWarshallStepper::new().run(graph)
}

/// Runs Warshall transitive closure and returns the full step sequence
pub fn run_warshall<W>(graph: &Graph<W>) -> Result<WarshallSteps>
where
    W: Float + Zero + Debug + Copy,
{
    WarshallStepper::new().run(graph)
}

/// Runs Kruskal MST and returns the full step sequence.
/// The graph must be undirected.
pub fn run_kruskal<W>(graph: &Graph<W>) -> Result<KruskalSteps<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    KruskalStepper::new().run(graph)
}
