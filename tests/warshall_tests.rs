use std::collections::BTreeSet;

use graph_stepper::{run_warshall, Edge, Graph, StepAction};
use ordered_float::OrderedFloat;

fn w(x: f64) -> OrderedFloat<f64> {
    OrderedFloat(x)
}

fn chain_graph() -> Graph<OrderedFloat<f64>> {
    Graph::build(
        ["A", "B", "C"],
        vec![
            Edge::directed("A", "B", w(1.0)),
            Edge::directed("B", "C", w(1.0)),
        ],
    )
    .unwrap()
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

#[test]
fn test_init_is_input_relation_plus_diagonal() {
    let steps = run_warshall(&chain_graph()).unwrap();
    let init = steps.step_at(0).unwrap();
    assert!(init.is_init());
    assert!(init.changes.is_empty());

    let expected: BTreeSet<_> = [
        pair("A", "A"),
        pair("B", "B"),
        pair("C", "C"),
        pair("A", "B"),
        pair("B", "C"),
    ]
    .into_iter()
    .collect();
    assert_eq!(init.snapshot.reachable_pairs(), expected);
}

#[test]
fn test_closure_is_derived_step_by_step() {
    let steps = run_warshall(&chain_graph()).unwrap();
    assert_eq!(steps.step_count(), 4, "init plus one step per vertex");

    // Nothing can be routed through A; the new pair appears at k = B
    let k_a = steps.step_at(1).unwrap();
    assert_eq!(k_a.snapshot.k_node.as_deref(), Some("A"));
    assert!(k_a.changes.iter().all(|c| !c.changed));

    let k_b = steps.step_at(2).unwrap();
    let flipped: Vec<_> = k_b.changes.iter().filter(|c| c.changed).collect();
    assert_eq!(flipped.len(), 1);
    assert_eq!(flipped[0].key, pair("A", "C"));
    assert!(!flipped[0].old);
    assert!(flipped[0].new);

    let final_snapshot = &steps.final_step().unwrap().snapshot;
    assert_eq!(final_snapshot.reachable("A", "C"), Some(true));
    assert_eq!(final_snapshot.reachable("C", "A"), Some(false));
}

#[test]
fn test_every_pair_is_recorded_each_step() {
    let steps = run_warshall(&chain_graph()).unwrap();
    for step in steps.iter().skip(1) {
        assert_eq!(step.action(), StepAction::Iteration);
        assert_eq!(step.changes.len(), 9);
    }
}

#[test]
fn test_added_since_input() {
    let steps = run_warshall(&chain_graph()).unwrap();
    let init = &steps.step_at(0).unwrap().snapshot;
    let last = &steps.final_step().unwrap().snapshot;

    let added = last.added_since(init);
    let expected: BTreeSet<_> = [pair("A", "C")].into_iter().collect();
    assert_eq!(added, expected);
}

#[test]
fn test_cells_never_flip_back() {
    let graph = Graph::build(
        ["A", "B", "C", "D"],
        vec![
            Edge::directed("A", "B", w(1.0)),
            Edge::directed("B", "C", w(1.0)),
            Edge::directed("C", "A", w(1.0)),
            Edge::directed("C", "D", w(1.0)),
        ],
    )
    .unwrap();
    let steps = run_warshall(&graph).unwrap();

    let all: Vec<_> = steps.iter().collect();
    for pair in all.windows(2) {
        let (before, after) = (&pair[0].snapshot, &pair[1].snapshot);
        for i in 0..before.nodes.len() {
            for j in 0..before.nodes.len() {
                assert!(
                    after.reach[i][j] || !before.reach[i][j],
                    "a true cell went back to false"
                );
            }
        }
    }

    // The cycle makes A, B, C mutually reachable
    let last = &steps.final_step().unwrap().snapshot;
    for from in ["A", "B", "C"] {
        for to in ["A", "B", "C", "D"] {
            assert_eq!(last.reachable(from, to), Some(true));
        }
    }
    assert_eq!(last.reachable("D", "A"), Some(false));
}

#[test]
fn test_undirected_edges_count_both_ways() {
    let graph = Graph::build(["A", "B"], vec![Edge::undirected("A", "B", w(1.0))]).unwrap();
    let steps = run_warshall(&graph).unwrap();
    let init = &steps.step_at(0).unwrap().snapshot;
    assert_eq!(init.reachable("A", "B"), Some(true));
    assert_eq!(init.reachable("B", "A"), Some(true));
}
