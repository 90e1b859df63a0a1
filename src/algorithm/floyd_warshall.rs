use std::collections::HashMap;
use std::fmt::Debug;

use log::{debug, error};
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::SteppedAlgorithm;
use crate::graph::{Graph, NodeId};
use crate::trace::{Step, StepAction, StepRecorder, StepSequence};
use crate::{Error, Result};

/// Step sequence produced by [`FloydWarshallStepper`]
pub type FloydSteps<W> = StepSequence<FloydSnapshot<W>, PairUpdate<W>>;

/// Distance and path matrices at the end of one k-iteration.
///
/// Matrices are indexed by the lexicographic node order carried in `nodes`,
/// so every snapshot is self-contained. `W::infinity()` marks "no path";
/// `next_hop[i][j]` is the first node after `i` on the best known route to
/// `j`, or `None` when no hop is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloydSnapshot<W> {
    /// Index of the intermediate vertex of this step; `None` on init
    pub k_index: Option<usize>,
    /// Label of the intermediate vertex of this step; `None` on init
    pub k_node: Option<NodeId>,
    /// The matrix order
    pub nodes: Vec<NodeId>,
    pub dist: Vec<Vec<W>>,
    pub next_hop: Vec<Vec<Option<NodeId>>>,
}

impl<W> FloydSnapshot<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Position of `node` in the matrix order
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    /// Best known distance from `from` to `to`; `None` for unknown labels,
    /// `W::infinity()` when no path is known yet
    pub fn distance(&self, from: &str, to: &str) -> Option<W> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.dist[i][j])
    }

    /// First hop from `from` toward `to`, if one is known
    pub fn hop(&self, from: &str, to: &str) -> Option<NodeId> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        self.next_hop[i][j].clone()
    }
}

/// One examined (i, j) pair of a k-iteration.
///
/// `candidate` is `dist[i][k] + dist[k][j]` whether or not it won, so a
/// front end can render "kept (old <= candidate)" for unchanged cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairUpdate<W> {
    pub from: NodeId,
    pub to: NodeId,
    pub old_dist: W,
    pub candidate: W,
    pub old_hop: Option<NodeId>,
    pub new_hop: Option<NodeId>,
    pub changed: bool,
}

/// All-pairs shortest paths, one intermediate vertex k per step.
///
/// Every ordered pair is recorded for every k, changed or not: the full
/// matrix diff per step is the point of the replay, not an inefficiency.
#[derive(Debug, Clone, Default)]
pub struct FloydWarshallStepper;

impl FloydWarshallStepper {
    /// Creates a new Floyd-Warshall stepper
    pub fn new() -> Self {
        FloydWarshallStepper
    }
}

impl<W> SteppedAlgorithm<W> for FloydWarshallStepper
where
    W: Float + Zero + Debug + Copy,
{
    type Snapshot = FloydSnapshot<W>;
    type Change = PairUpdate<W>;

    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn run(&self, graph: &Graph<W>) -> Result<FloydSteps<W>> {
        let nodes = graph.sorted_nodes();
        let n = nodes.len();
        let index: HashMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, node)| (node, i)).collect();

        debug!("floyd-warshall: {} nodes, {} edges", n, graph.edge_count());

        let mut dist = vec![vec![W::infinity(); n]; n];
        let mut next_hop: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = W::zero();
        }
        for (i, node) in nodes.iter().enumerate() {
            for (neighbor, weight) in graph.neighbors_of(node)? {
                let j = index[&neighbor];
                // Minimum wins when several arcs feed the same cell
                if weight < dist[i][j] {
                    dist[i][j] = weight;
                    next_hop[i][j] = Some(neighbor);
                }
            }
        }

        let mut recorder = StepRecorder::new();
        recorder.record(
            StepAction::Init,
            FloydSnapshot {
                k_index: None,
                k_node: None,
                nodes: nodes.clone(),
                dist: dist.clone(),
                next_hop: next_hop.clone(),
            },
            Vec::new(),
        );

        for k in 0..n {
            let mut updates = Vec::with_capacity(n * n);
            for i in 0..n {
                for j in 0..n {
                    let old_dist = dist[i][j];
                    let old_hop = next_hop[i][j].clone();
                    let candidate = dist[i][k] + dist[k][j];
                    if candidate < old_dist {
                        dist[i][j] = candidate;
                        next_hop[i][j] = next_hop[i][k].clone();
                        updates.push(PairUpdate {
                            from: nodes[i].clone(),
                            to: nodes[j].clone(),
                            old_dist,
                            candidate,
                            old_hop,
                            new_hop: next_hop[i][j].clone(),
                            changed: true,
                        });
                    } else {
                        updates.push(PairUpdate {
                            from: nodes[i].clone(),
                            to: nodes[j].clone(),
                            old_dist,
                            candidate,
                            new_hop: old_hop.clone(),
                            old_hop,
                            changed: false,
                        });
                    }
                }
            }
            recorder.record(
                StepAction::Iteration,
                FloydSnapshot {
                    k_index: Some(k),
                    k_node: Some(nodes[k].clone()),
                    nodes: nodes.clone(),
                    dist: dist.clone(),
                    next_hop: next_hop.clone(),
                },
                updates,
            );
        }

        debug!("floyd-warshall: {} steps recorded", recorder.len());
        Ok(recorder.finish())
    }
}

/// Walks the path matrix of a Floyd-Warshall step from `src` to `dst`.
///
/// Fails with [`Error::NoPath`] when the distance is infinite. A missing hop
/// or a walk longer than `|V| + 5` means the matrices are inconsistent;
/// that should be unreachable and is logged loudly before failing with
/// [`Error::PathReconstructionFailed`].
pub fn reconstruct_path<W>(
    step: &Step<FloydSnapshot<W>, PairUpdate<W>>,
    src: &str,
    dst: &str,
) -> Result<Vec<NodeId>>
where
    W: Float + Zero + Debug + Copy,
{
    let snapshot = &step.snapshot;
    let i = snapshot
        .index_of(src)
        .ok_or_else(|| Error::UnknownNode(src.to_string()))?;
    let j = snapshot
        .index_of(dst)
        .ok_or_else(|| Error::UnknownNode(dst.to_string()))?;

    if !snapshot.dist[i][j].is_finite() {
        return Err(Error::NoPath(src.to_string(), dst.to_string()));
    }

    let mut route = vec![snapshot.nodes[i].clone()];
    let mut current = i;
    let limit = snapshot.nodes.len() + 5;
    let mut hops = 0;

    while current != j {
        let next = match &snapshot.next_hop[current][j] {
            Some(next) => next,
            None => {
                error!(
                    "path matrix has a finite distance {:?} from {} to {} but no hop at {}",
                    snapshot.dist[i][j], src, dst, snapshot.nodes[current]
                );
                return Err(Error::PathReconstructionFailed(
                    src.to_string(),
                    dst.to_string(),
                ));
            }
        };
        let next_index = match snapshot.index_of(next) {
            Some(index) => index,
            None => {
                error!("path matrix names unknown node {} from {} to {}", next, src, dst);
                return Err(Error::PathReconstructionFailed(
                    src.to_string(),
                    dst.to_string(),
                ));
            }
        };
        route.push(next.clone());
        current = next_index;
        hops += 1;
        if hops > limit {
            error!(
                "path walk from {} to {} exceeded {} hops, matrices are cyclic",
                src, dst, limit
            );
            return Err(Error::PathReconstructionFailed(
                src.to_string(),
                dst.to_string(),
            ));
        }
    }

    Ok(route)
}
