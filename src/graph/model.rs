use std::collections::HashMap;
use std::fmt::Debug;

use num_traits::{Float, ToPrimitive, Zero};
use serde::Serialize;

use crate::{Error, Result};

/// Opaque node label. Comparison is plain string ordering, which is also the
/// lexicographic matrix order used by the all-pairs steppers.
pub type NodeId = String;

/// A single input edge. Undirected edges are stored once and are traversable
/// both ways; directed edges only from `a` to `b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge<W> {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: W,
    pub directed: bool,
}

impl<W> Edge<W> {
    /// Creates an undirected edge between `a` and `b`.
    pub fn undirected(a: impl Into<NodeId>, b: impl Into<NodeId>, weight: W) -> Self {
        Edge {
            a: a.into(),
            b: b.into(),
            weight,
            directed: false,
        }
    }

    /// Creates a directed edge from `a` to `b`.
    pub fn directed(a: impl Into<NodeId>, b: impl Into<NodeId>, weight: W) -> Self {
        Edge {
            a: a.into(),
            b: b.into(),
            weight,
            directed: true,
        }
    }
}

/// A labeled, weighted graph mixing directed and undirected edges.
///
/// Nodes are kept in insertion order; the steppers that need a fixed matrix
/// order ask for [`Graph::sorted_nodes`] instead. There are no removal
/// operations: callers rebuild from scratch rather than mutate mid-algorithm.
#[derive(Debug, Clone, Default)]
pub struct Graph<W> {
    labels: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    outgoing: Vec<Vec<(usize, W)>>,
    edges: Vec<Edge<W>>,
}

impl<W> Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        Graph {
            labels: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Builds a graph from a node list and an edge list in one call.
    ///
    /// Construction is all-or-nothing: the first invalid node or edge aborts
    /// the call and no graph is produced.
    pub fn build<I, S>(nodes: I, edges: Vec<Edge<W>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let mut graph = Graph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Adds a node, failing with [`Error::DuplicateNode`] if the label is
    /// already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }
        self.index.insert(id.clone(), self.labels.len());
        self.labels.push(id);
        self.outgoing.push(Vec::new());
        Ok(())
    }

    /// Adds an edge between existing nodes.
    ///
    /// Fails with [`Error::UnknownNode`] if either endpoint is absent and
    /// with [`Error::InvalidWeight`] if the weight is negative or non-finite.
    /// Supplying the same pair twice overwrites the stored weight (last write
    /// wins); the core does not reject multi-edges.
    pub fn add_edge(&mut self, edge: Edge<W>) -> Result<()> {
        let ai = self.index_of(&edge.a)?;
        let bi = self.index_of(&edge.b)?;
        if edge.weight < W::zero() || !edge.weight.is_finite() {
            return Err(Error::InvalidWeight(
                edge.weight.to_f64().unwrap_or(f64::NAN),
            ));
        }

        Self::upsert_arc(&mut self.outgoing[ai], bi, edge.weight);
        if !edge.directed {
            Self::upsert_arc(&mut self.outgoing[bi], ai, edge.weight);
        }

        // One record per logical edge: replace an earlier write to the same
        // (ordered or unordered) pair instead of accumulating duplicates.
        let existing = self.edges.iter().position(|e| {
            e.directed == edge.directed
                && if edge.directed {
                    e.a == edge.a && e.b == edge.b
                } else {
                    (e.a == edge.a && e.b == edge.b) || (e.a == edge.b && e.b == edge.a)
                }
        });
        match existing {
            Some(i) => self.edges[i].weight = edge.weight,
            None => self.edges.push(edge),
        }
        Ok(())
    }

    /// Returns the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of stored edges (an undirected edge counts once)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node labels in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.labels
    }

    /// Node labels in lexicographic order, the caller-visible matrix order
    /// used by the all-pairs steppers.
    pub fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.labels.clone();
        nodes.sort();
        nodes
    }

    /// Returns true if the label names a node of this graph
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes reachable from `id` by one hop, respecting edge direction.
    pub fn neighbors_of(&self, id: &str) -> Result<Vec<(NodeId, W)>> {
        let i = self.index_of(id)?;
        Ok(self.outgoing[i]
            .iter()
            .map(|&(j, w)| (self.labels[j].clone(), w))
            .collect())
    }

    /// The stored weight of the arc from `a` to `b`, or `None` if there is no
    /// such arc (the "no edge" sentinel).
    pub fn weight_of(&self, a: &str, b: &str) -> Option<W> {
        let ai = *self.index.get(a)?;
        let bi = *self.index.get(b)?;
        self.outgoing[ai]
            .iter()
            .find(|&&(j, _)| j == bi)
            .map(|&(_, w)| w)
    }

    /// The stored edge records, one per logical edge
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// Returns true if every stored edge is undirected
    pub fn is_undirected(&self) -> bool {
        self.edges.iter().all(|e| !e.directed)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    fn upsert_arc(arcs: &mut Vec<(usize, W)>, to: usize, weight: W) {
        match arcs.iter().position(|&(j, _)| j == to) {
            Some(i) => arcs[i].1 = weight,
            None => arcs.push((to, weight)),
        }
    }
}
