use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::trace::StepSequence;
use crate::Result;

/// Trait for algorithms that replay as a recorded step sequence.
///
/// A stepper holds its own configuration (e.g. the Dijkstra source node) and
/// computes the entire sequence eagerly in one `run` call. The returned
/// sequence is immutable and owned by the caller; running again produces a
/// fresh sequence.
pub trait SteppedAlgorithm<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Full state captured at the end of each step
    type Snapshot;

    /// Per-entry change record attached to each step
    type Change;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Compute the full step sequence for `graph`
    fn run(&self, graph: &Graph<W>) -> Result<StepSequence<Self::Snapshot, Self::Change>>;
}
