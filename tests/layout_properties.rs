//! Property tests over randomly generated process graphs (cycles, self-loops
//! and parallel processes included).

use std::collections::BTreeSet;

use lab_process_graph::{
    Context, EngineConfig, Entity, LdGraph, Point, ProcessGraph, ProcessGraphError,
};
use proptest::prelude::*;

/// (inputs, outputs) as sample indices
type ProcessShape = (Vec<usize>, Vec<usize>);

fn sample_id(i: usize) -> String {
    format!("#sample/{i}")
}

fn build_graph(samples: usize, processes: &[ProcessShape]) -> LdGraph {
    let mut entities: Vec<Entity> = (0..samples)
        .map(|i| Entity::new(sample_id(i), &["Sample"]))
        .collect();

    for (j, (inputs, outputs)) in processes.iter().enumerate() {
        let inputs: Vec<String> = inputs.iter().map(|&i| sample_id(i)).collect();
        let outputs: Vec<String> = outputs.iter().map(|&i| sample_id(i)).collect();
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let outputs: Vec<&str> = outputs.iter().map(String::as_str).collect();
        entities.push(
            Entity::new(format!("#process/{j}"), &["LabProcess"])
                .with_property("name", format!("step {j}"))
                .with_refs("object", &inputs)
                .with_refs("result", &outputs),
        );
    }

    let context = Context::new()
        .with_vocab("http://schema.org/")
        .with_alias("LabProcess", "https://bioschemas.org/LabProcess");
    LdGraph::new(entities, Some(context))
}

fn process_graphs() -> impl Strategy<Value = (usize, Vec<ProcessShape>)> {
    (1usize..8).prop_flat_map(|samples| {
        let endpoints = prop::collection::vec(0..samples, 0..3);
        (
            Just(samples),
            prop::collection::vec((endpoints.clone(), endpoints), 0..12),
        )
    })
}

fn accepted(processes: &[ProcessShape]) -> impl Iterator<Item = (usize, usize)> + '_ {
    processes
        .iter()
        .filter_map(|(inputs, outputs)| Some((*inputs.first()?, *outputs.first()?)))
}

proptest! {
    #[test]
    fn nodes_are_unique_endpoints((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();

        let expected: BTreeSet<String> = accepted(&processes)
            .flat_map(|(i, o)| [sample_id(i), sample_id(o)])
            .collect();
        let actual: BTreeSet<String> = pg.model().nodes.keys().cloned().collect();

        prop_assert_eq!(pg.model().nodes.len(), expected.len());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn one_edge_per_accepted_process((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();

        prop_assert_eq!(pg.model().edges.len(), accepted(&processes).count());
    }

    #[test]
    fn edges_reference_existing_nodes((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();
        let model = pg.model();

        for edge in model.edges.values() {
            prop_assert!(model.nodes.contains_key(&edge.source));
            prop_assert!(model.nodes.contains_key(&edge.target));
        }
    }

    #[test]
    fn every_node_is_placed_in_unit_square((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();
        let model = pg.model();

        for node in model.nodes.values() {
            let (x, y) = node.position().expect("laid out");
            prop_assert!(x.is_finite() && y.is_finite());
            prop_assert!((0.0..=1.0).contains(&x), "x = {}", x);
            prop_assert!((0.0..=1.0).contains(&y), "y = {}", y);
        }

        if pg.layout_result().rank_count == 1 {
            prop_assert!(model.nodes.values().all(|n| n.x == Some(0.0)));
        }
    }

    #[test]
    fn forward_edges_increase_rank((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();
        let model = pg.model();
        let back_edges = &pg.layout_result().back_edges;

        for edge in model.edges.values() {
            if back_edges.contains(&edge.id) {
                continue;
            }
            let source = model.nodes[&edge.source].rank.unwrap();
            let target = model.nodes[&edge.target].rank.unwrap();
            prop_assert!(source < target, "{} -> {}", edge.source, edge.target);
        }
    }

    #[test]
    fn zoom_targets_match_coordinates((samples, processes) in process_graphs()) {
        let graph = build_graph(samples, &processes);
        let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();
        let model = pg.model();
        let nav = pg.navigation();

        for node in model.nodes.values() {
            let (x, y) = node.position().unwrap();
            prop_assert_eq!(nav.zoom_target(&node.id).unwrap(), Point::new(x, y));
        }
        for edge in model.edges.values() {
            let (sx, sy) = model.nodes[&edge.source].position().unwrap();
            let (tx, ty) = model.nodes[&edge.target].position().unwrap();
            prop_assert_eq!(
                nav.zoom_target(&edge.id).unwrap(),
                Point::new((sx + tx) / 2.0, (sy + ty) / 2.0)
            );
        }
        let is_location_not_found = matches!(
            nav.zoom_target("#not/a/location"),
            Err(ProcessGraphError::LocationNotFound { .. })
        );
        prop_assert!(is_location_not_found);
    }
}
