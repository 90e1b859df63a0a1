use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::SteppedAlgorithm;
use crate::data_structures::UnionFind;
use crate::graph::{Graph, NodeId};
use crate::trace::{StepAction, StepRecorder, StepSequence};
use crate::{Error, Result};

/// Step sequence produced by [`KruskalStepper`]
pub type KruskalSteps<W> = StepSequence<KruskalSnapshot<W>, EdgeDecision<W>>;

/// A candidate or accepted MST edge, endpoints normalized so `a <= b`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MstEdge<W> {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: W,
}

/// The verdict on the edge considered at one step: accepted into the MST, or
/// rejected because its endpoints were already connected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDecision<W> {
    /// Position of the edge in the sorted candidate order
    pub index: usize,
    pub edge: MstEdge<W>,
    pub accepted: bool,
}

/// Forest state at the end of one Kruskal step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KruskalSnapshot<W> {
    /// Edge examined in this iteration; `None` on init and final steps
    pub considered: Option<MstEdge<W>>,
    /// Verdict on the considered edge
    pub accepted: Option<bool>,
    /// MST edges accumulated so far, in acceptance order
    pub mst_edges: Vec<MstEdge<W>>,
    pub total_weight: W,
    /// Union-Find components, each group sorted, groups ordered by root
    pub components: Vec<Vec<NodeId>>,
}

/// Minimum spanning tree by global edge sort plus Union-Find, one candidate
/// edge per step.
///
/// Candidates are sorted once, ascending by `(weight, a, b)` after endpoint
/// normalization; that tuple is the deterministic tie-break for equal
/// weights. A disconnected input yields a spanning forest with fewer than
/// `|V| - 1` accepted edges, which is a valid terminal state.
#[derive(Debug, Clone, Default)]
pub struct KruskalStepper;

impl KruskalStepper {
    /// Creates a new Kruskal stepper
    pub fn new() -> Self {
        KruskalStepper
    }
}

impl<W> SteppedAlgorithm<W> for KruskalStepper
where
    W: Float + Zero + Debug + Copy + Ord,
{
    type Snapshot = KruskalSnapshot<W>;
    type Change = EdgeDecision<W>;

    fn name(&self) -> &'static str {
        "Kruskal"
    }

    fn run(&self, graph: &Graph<W>) -> Result<KruskalSteps<W>> {
        for edge in graph.edges() {
            if edge.directed {
                return Err(Error::RequiresUndirected(edge.a.clone(), edge.b.clone()));
            }
        }

        let nodes = graph.sorted_nodes();
        let mut forest = UnionFind::with_elements(nodes.iter().cloned());

        let mut sorted_edges: Vec<MstEdge<W>> = graph
            .edges()
            .iter()
            .map(|edge| {
                let (a, b) = if edge.a <= edge.b {
                    (edge.a.clone(), edge.b.clone())
                } else {
                    (edge.b.clone(), edge.a.clone())
                };
                MstEdge {
                    a,
                    b,
                    weight: edge.weight,
                }
            })
            .collect();
        sorted_edges.sort_by(|x, y| {
            (x.weight, &x.a, &x.b).cmp(&(y.weight, &y.a, &y.b))
        });

        debug!(
            "kruskal: {} nodes, {} candidate edges",
            nodes.len(),
            sorted_edges.len()
        );

        let mut recorder = StepRecorder::new();
        recorder.record(
            StepAction::Init,
            KruskalSnapshot {
                considered: None,
                accepted: None,
                mst_edges: Vec::new(),
                total_weight: W::zero(),
                components: component_groups(&mut forest),
            },
            Vec::new(),
        );

        let mut mst_edges: Vec<MstEdge<W>> = Vec::new();
        let mut total_weight = W::zero();

        for (index, edge) in sorted_edges.iter().enumerate() {
            // union returns false exactly when the edge would form a cycle
            let accepted = forest.union(&edge.a, &edge.b);
            if accepted {
                mst_edges.push(edge.clone());
                total_weight = total_weight + edge.weight;
            }
            recorder.record(
                StepAction::Iteration,
                KruskalSnapshot {
                    considered: Some(edge.clone()),
                    accepted: Some(accepted),
                    mst_edges: mst_edges.clone(),
                    total_weight,
                    components: component_groups(&mut forest),
                },
                vec![EdgeDecision {
                    index,
                    edge: edge.clone(),
                    accepted,
                }],
            );
        }

        recorder.record(
            StepAction::Final,
            KruskalSnapshot {
                considered: None,
                accepted: None,
                mst_edges: mst_edges.clone(),
                total_weight,
                components: component_groups(&mut forest),
            },
            Vec::new(),
        );

        debug!(
            "kruskal: accepted {}/{} edges, total weight {:?}",
            mst_edges.len(),
            sorted_edges.len(),
            total_weight
        );
        Ok(recorder.finish())
    }
}

fn component_groups<T>(forest: &mut UnionFind<T>) -> Vec<Vec<T>>
where
    T: Eq + std::hash::Hash + Ord + Clone + Debug,
{
    forest.components().into_values().collect()
}
