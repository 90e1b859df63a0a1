use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use log::debug;
use num_traits::{Float, ToPrimitive, Zero};
use serde::Serialize;

use crate::algorithm::SteppedAlgorithm;
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{Graph, NodeId};
use crate::trace::{Change, StepAction, StepRecorder, StepSequence};
use crate::{Error, Result};

/// Step sequence produced by [`DijkstraStepper`]
pub type DijkstraSteps<W> = StepSequence<DijkstraSnapshot<W>, Change<NodeId, W>>;

/// State at the end of one Dijkstra iteration.
///
/// Distances use `W::infinity()` as the "not yet reached" sentinel. The
/// relaxed edges that actually changed this step are `(current, change.key)`
/// for every changed entry in the step's change list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DijkstraSnapshot<W> {
    /// Node settled in this iteration; `None` on the init step
    pub current: Option<NodeId>,
    /// Nodes whose distances are permanent
    pub visited: BTreeSet<NodeId>,
    /// Best known distance from the source per node
    pub dist: BTreeMap<NodeId, W>,
    /// Predecessor on the best known path per node
    pub prev: BTreeMap<NodeId, Option<NodeId>>,
}

/// Single-source shortest paths, one settled node per step.
///
/// Step 0 initializes every distance to infinity except the source. Each
/// later step pops the minimum-distance unsettled node from the priority
/// queue, marks it visited, and relaxes its unvisited neighbors, recording
/// one change entry per neighbor examined whether or not it improved.
#[derive(Debug, Clone)]
pub struct DijkstraStepper {
    source: NodeId,
}

impl DijkstraStepper {
    /// Creates a stepper that runs from `source`
    pub fn new(source: impl Into<NodeId>) -> Self {
        DijkstraStepper {
            source: source.into(),
        }
    }

    /// The configured source node
    pub fn source(&self) -> &NodeId {
        &self.source
    }
}

impl<W> SteppedAlgorithm<W> for DijkstraStepper
where
    W: Float + Zero + Debug + Copy + Ord,
{
    type Snapshot = DijkstraSnapshot<W>;
    type Change = Change<NodeId, W>;

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn run(&self, graph: &Graph<W>) -> Result<DijkstraSteps<W>> {
        if !graph.contains_node(&self.source) {
            return Err(Error::UnknownSource(self.source.clone()));
        }
        // Dijkstra's correctness requires non-negative weights; checked
        // eagerly so a bad graph never produces a partial sequence.
        for edge in graph.edges() {
            if edge.weight < W::zero() {
                return Err(Error::NegativeWeight {
                    from: edge.a.clone(),
                    to: edge.b.clone(),
                    weight: edge.weight.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        debug!(
            "dijkstra: {} nodes, {} edges, source {}",
            graph.node_count(),
            graph.edge_count(),
            self.source
        );

        let mut dist: BTreeMap<NodeId, W> = graph
            .nodes()
            .iter()
            .map(|n| (n.clone(), W::infinity()))
            .collect();
        let mut prev: BTreeMap<NodeId, Option<NodeId>> =
            graph.nodes().iter().map(|n| (n.clone(), None)).collect();
        dist.insert(self.source.clone(), W::zero());

        let mut visited: BTreeSet<NodeId> = BTreeSet::new();
        let mut recorder = StepRecorder::new();
        recorder.record(
            StepAction::Init,
            DijkstraSnapshot {
                current: None,
                visited: visited.clone(),
                dist: dist.clone(),
                prev: prev.clone(),
            },
            Vec::new(),
        );

        let mut queue = BinaryHeapWrapper::new();
        queue.push(self.source.clone(), W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            // Skip settled nodes and stale queue entries
            if visited.contains(&u) {
                continue;
            }
            if dist_u > dist[&u] {
                continue;
            }

            let mut changes = Vec::new();
            for (v, weight) in graph.neighbors_of(&u)? {
                if visited.contains(&v) {
                    continue;
                }
                let old = dist[&v];
                let candidate = dist[&u] + weight;
                if candidate < old {
                    dist.insert(v.clone(), candidate);
                    prev.insert(v.clone(), Some(u.clone()));
                    queue.push(v.clone(), candidate);
                    changes.push(Change::changed(v, old, candidate));
                } else {
                    changes.push(Change::unchanged(v, old, candidate));
                }
            }

            visited.insert(u.clone());
            recorder.record(
                StepAction::Iteration,
                DijkstraSnapshot {
                    current: Some(u),
                    visited: visited.clone(),
                    dist: dist.clone(),
                    prev: prev.clone(),
                },
                changes,
            );

            if visited.len() == graph.node_count() {
                break;
            }
        }

        debug!(
            "dijkstra: settled {}/{} nodes in {} steps",
            visited.len(),
            graph.node_count(),
            recorder.len()
        );
        Ok(recorder.finish())
    }
}
