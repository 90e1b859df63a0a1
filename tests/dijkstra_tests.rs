use graph_stepper::{run_dijkstra, Edge, Error, Graph, StepAction};
use ordered_float::OrderedFloat;

fn w(x: f64) -> OrderedFloat<f64> {
    OrderedFloat(x)
}

fn inf() -> OrderedFloat<f64> {
    OrderedFloat(f64::INFINITY)
}

// The classroom example: five nodes, seven undirected edges.
fn example_graph() -> Graph<OrderedFloat<f64>> {
    Graph::build(
        ["A", "B", "C", "D", "E"],
        vec![
            Edge::undirected("A", "B", w(4.0)),
            Edge::undirected("A", "C", w(2.0)),
            Edge::undirected("B", "C", w(1.0)),
            Edge::undirected("B", "D", w(5.0)),
            Edge::undirected("C", "D", w(8.0)),
            Edge::undirected("C", "E", w(10.0)),
            Edge::undirected("D", "E", w(2.0)),
        ],
    )
    .unwrap()
}

#[test]
fn test_example_final_distances_and_predecessors() {
    let steps = run_dijkstra(&example_graph(), "A").unwrap();
    assert_eq!(steps.step_count(), 6, "init plus one settlement per node");

    let snapshot = &steps.final_step().unwrap().snapshot;
    assert_eq!(snapshot.dist["A"], w(0.0));
    assert_eq!(snapshot.dist["B"], w(3.0));
    assert_eq!(snapshot.dist["C"], w(2.0));
    assert_eq!(snapshot.dist["D"], w(8.0));
    assert_eq!(snapshot.dist["E"], w(10.0));

    // Predecessor chain for E: E <- D <- B <- C <- A
    assert_eq!(snapshot.prev["E"], Some("D".to_string()));
    assert_eq!(snapshot.prev["D"], Some("B".to_string()));
    assert_eq!(snapshot.prev["B"], Some("C".to_string()));
    assert_eq!(snapshot.prev["C"], Some("A".to_string()));
    assert_eq!(snapshot.prev["A"], None);
}

#[test]
fn test_init_step() {
    let steps = run_dijkstra(&example_graph(), "A").unwrap();
    let init = steps.step_at(0).unwrap();

    assert!(init.is_init());
    assert!(init.changes.is_empty());
    assert_eq!(init.snapshot.current, None);
    assert!(init.snapshot.visited.is_empty());
    assert_eq!(init.snapshot.dist["A"], w(0.0));
    for node in ["B", "C", "D", "E"] {
        assert_eq!(init.snapshot.dist[node], inf());
        assert_eq!(init.snapshot.prev[node], None);
    }
}

#[test]
fn test_settlement_order() {
    let steps = run_dijkstra(&example_graph(), "A").unwrap();
    let settled: Vec<String> = steps
        .iter()
        .skip(1)
        .map(|step| step.snapshot.current.clone().unwrap())
        .collect();
    assert_eq!(settled, vec!["A", "C", "B", "D", "E"]);

    for step in steps.iter().skip(1) {
        assert_eq!(step.action(), StepAction::Iteration);
    }
}

#[test]
fn test_relaxation_changes_are_recorded() {
    let steps = run_dijkstra(&example_graph(), "A").unwrap();

    // Settling A relaxes B (inf -> 4) and C (inf -> 2)
    let first = steps.step_at(1).unwrap();
    assert_eq!(first.changes.len(), 2);
    assert_eq!(first.changes[0].key, "B");
    assert_eq!(first.changes[0].old, inf());
    assert_eq!(first.changes[0].new, w(4.0));
    assert!(first.changes[0].changed);
    assert_eq!(first.changes[1].key, "C");
    assert_eq!(first.changes[1].new, w(2.0));
    assert!(first.changes[1].changed);

    // Settling C improves B from 4 to 3 via C
    let second = steps.step_at(2).unwrap();
    let b_update = second.changes.iter().find(|c| c.key == "B").unwrap();
    assert_eq!(b_update.old, w(4.0));
    assert_eq!(b_update.new, w(3.0));
    assert!(b_update.changed);
}

#[test]
fn test_losing_relaxation_is_recorded_unchanged() {
    // B is settled after A; relaxing C from B loses (1 + 5 > 1)
    let graph = Graph::build(
        ["A", "B", "C"],
        vec![
            Edge::undirected("A", "B", w(1.0)),
            Edge::undirected("A", "C", w(1.0)),
            Edge::undirected("B", "C", w(5.0)),
        ],
    )
    .unwrap();

    let steps = run_dijkstra(&graph, "A").unwrap();
    let b_step = steps
        .iter()
        .find(|s| s.snapshot.current.as_deref() == Some("B"))
        .unwrap();
    let c_update = b_step.changes.iter().find(|c| c.key == "C").unwrap();
    assert_eq!(c_update.old, w(1.0));
    assert_eq!(c_update.new, w(6.0), "the losing candidate value is kept");
    assert!(!c_update.changed);
}

#[test]
fn test_distances_never_increase() {
    let steps = run_dijkstra(&example_graph(), "A").unwrap();
    for pair in steps.iter().collect::<Vec<_>>().windows(2) {
        for (node, later) in &pair[1].snapshot.dist {
            assert!(
                *later <= pair[0].snapshot.dist[node],
                "distance of {} increased between steps",
                node
            );
        }
    }
}

#[test]
fn test_unknown_source() {
    let err = run_dijkstra(&example_graph(), "Z").unwrap_err();
    assert_eq!(err, Error::UnknownSource("Z".to_string()));
}

#[test]
fn test_directed_edges_are_one_way() {
    let graph = Graph::build(
        ["A", "B"],
        vec![Edge::directed("A", "B", w(1.0))],
    )
    .unwrap();

    let steps = run_dijkstra(&graph, "B").unwrap();
    let snapshot = &steps.final_step().unwrap().snapshot;
    assert_eq!(snapshot.dist["A"], inf());
    assert_eq!(snapshot.visited.len(), 1);
}

#[test]
fn test_disconnected_nodes_stay_infinite() {
    let graph = Graph::build(
        ["A", "B", "C"],
        vec![Edge::undirected("A", "B", w(1.0))],
    )
    .unwrap();

    let steps = run_dijkstra(&graph, "A").unwrap();
    assert_eq!(steps.step_count(), 3, "init plus the two reachable nodes");

    let snapshot = &steps.final_step().unwrap().snapshot;
    assert_eq!(snapshot.dist["C"], inf());
    assert_eq!(snapshot.prev["C"], None);
    assert!(!snapshot.visited.contains("C"));
}

#[test]
fn test_single_node_graph() {
    let graph = Graph::<OrderedFloat<f64>>::build(["A"], vec![]).unwrap();
    let steps = run_dijkstra(&graph, "A").unwrap();
    assert_eq!(steps.step_count(), 2);
    let snapshot = &steps.final_step().unwrap().snapshot;
    assert_eq!(snapshot.dist["A"], w(0.0));
    assert!(snapshot.visited.contains("A"));
}
