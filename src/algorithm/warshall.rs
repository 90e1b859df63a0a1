use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::SteppedAlgorithm;
use crate::graph::{Graph, NodeId};
use crate::trace::{Change, StepAction, StepRecorder, StepSequence};
use crate::Result;

/// Step sequence produced by [`WarshallStepper`]
pub type WarshallSteps = StepSequence<WarshallSnapshot, Change<(NodeId, NodeId), bool>>;

/// Reachability matrix at the end of one k-iteration.
///
/// The init snapshot is the input relation itself (edges plus the reflexive
/// diagonal), so "pairs added so far" is always `added_since(&init)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarshallSnapshot {
    /// Index of the intermediate vertex of this step; `None` on init
    pub k_index: Option<usize>,
    /// Label of the intermediate vertex of this step; `None` on init
    pub k_node: Option<NodeId>,
    /// The matrix order
    pub nodes: Vec<NodeId>,
    pub reach: Vec<Vec<bool>>,
}

impl WarshallSnapshot {
    /// Position of `node` in the matrix order
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    /// Whether `to` is reachable from `from`; `None` for unknown labels
    pub fn reachable(&self, from: &str, to: &str) -> Option<bool> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.reach[i][j])
    }

    /// Every currently-true (from, to) pair, diagonal included
    pub fn reachable_pairs(&self) -> BTreeSet<(NodeId, NodeId)> {
        let mut pairs = BTreeSet::new();
        for (i, row) in self.reach.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell {
                    pairs.insert((self.nodes[i].clone(), self.nodes[j].clone()));
                }
            }
        }
        pairs
    }

    /// Pairs true here but not in `earlier`. Against the init snapshot this
    /// is everything Warshall has derived beyond the original relation.
    pub fn added_since(&self, earlier: &WarshallSnapshot) -> BTreeSet<(NodeId, NodeId)> {
        self.reachable_pairs()
            .difference(&earlier.reachable_pairs())
            .cloned()
            .collect()
    }
}

/// Boolean transitive closure, one intermediate vertex k per step.
///
/// Same iteration skeleton as Floyd-Warshall specialized to reachability:
/// `reach[i][j] |= reach[i][k] && reach[k][j]`. Cells only ever flip from
/// false to true. Every ordered pair is recorded for every k.
#[derive(Debug, Clone, Default)]
pub struct WarshallStepper;

impl WarshallStepper {
    /// Creates a new Warshall stepper
    pub fn new() -> Self {
        WarshallStepper
    }
}

impl<W> SteppedAlgorithm<W> for WarshallStepper
where
    W: Float + Zero + Debug + Copy,
{
    type Snapshot = WarshallSnapshot;
    type Change = Change<(NodeId, NodeId), bool>;

    fn name(&self) -> &'static str {
        "Warshall"
    }

    fn run(&self, graph: &Graph<W>) -> Result<WarshallSteps> {
        let nodes = graph.sorted_nodes();
        let n = nodes.len();
        let index: HashMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, node)| (node, i)).collect();

        debug!("warshall: {} nodes, {} edges", n, graph.edge_count());

        // W0: the input relation plus the reflexive diagonal
        let mut reach = vec![vec![false; n]; n];
        for (i, row) in reach.iter_mut().enumerate() {
            row[i] = true;
        }
        for (i, node) in nodes.iter().enumerate() {
            for (neighbor, _) in graph.neighbors_of(node)? {
                reach[i][index[&neighbor]] = true;
            }
        }

        let mut recorder = StepRecorder::new();
        recorder.record(
            StepAction::Init,
            WarshallSnapshot {
                k_index: None,
                k_node: None,
                nodes: nodes.clone(),
                reach: reach.clone(),
            },
            Vec::new(),
        );

        for k in 0..n {
            let mut updates = Vec::with_capacity(n * n);
            for i in 0..n {
                for j in 0..n {
                    let old = reach[i][j];
                    let new = old || (reach[i][k] && reach[k][j]);
                    let key = (nodes[i].clone(), nodes[j].clone());
                    if new != old {
                        reach[i][j] = new;
                        updates.push(Change::changed(key, old, new));
                    } else {
                        updates.push(Change::unchanged(key, old, new));
                    }
                }
            }
            recorder.record(
                StepAction::Iteration,
                WarshallSnapshot {
                    k_index: Some(k),
                    k_node: Some(nodes[k].clone()),
                    nodes: nodes.clone(),
                    reach: reach.clone(),
                },
                updates,
            );
        }

        debug!("warshall: {} steps recorded", recorder.len());
        Ok(recorder.finish())
    }
}
