//! Layered layout engine for process graphs
//!
//! ## Algorithm
//!
//! 1. Build index-based adjacency from the edge map
//! 2. Assign ranks by longest path from the source nodes (Kahn order)
//! 3. Break cycles by force-releasing the first blocked node in insertion order;
//!    edges into already-released nodes are reported as back-edges
//! 4. Order each rank by barycenter sweeps (down + up), keeping the ordering
//!    with the fewest crossings
//! 5. x = rank * rank_spacing (left-to-right), y = order * node_spacing
//! 6. Min-max normalize each axis into [0, 1]; a zero span divides by 1

use std::collections::VecDeque;

use crate::config::LayoutConfig;

use super::types::Model;

/// Edge between two node indices
#[derive(Debug, Clone, Copy)]
struct LayoutEdge {
    /// Position in the model's edge map
    index: usize,
    from: usize,
    to: usize,
}

/// Summary of a layout pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutResult {
    /// Number of ranks (0 for an empty model)
    pub rank_count: usize,
    /// Crossings between adjacent ranks in the final ordering
    pub crossings: usize,
    /// Ids of edges ignored during rank assignment because they close a cycle
    pub back_edges: Vec<String>,
}

impl LayoutResult {
    pub fn is_acyclic(&self) -> bool {
        self.back_edges.is_empty()
    }
}

/// Layered (Sugiyama-style) layout engine
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalid spacings (non-finite or not positive) fall back to defaults.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Assign normalized coordinates and ranks to every node in `model`.
    ///
    /// An empty model is left untouched.
    pub fn layout(&self, model: &mut Model) -> LayoutResult {
        let mut result = LayoutResult::default();
        let node_count = model.nodes.len();
        if node_count == 0 {
            return result;
        }

        let edges: Vec<LayoutEdge> = model
            .edges
            .values()
            .enumerate()
            .filter_map(|(index, edge)| {
                Some(LayoutEdge {
                    index,
                    from: model.nodes.get_index_of(&edge.source)?,
                    to: model.nodes.get_index_of(&edge.target)?,
                })
            })
            .collect();

        let (ranks, back_edges) = assign_ranks(node_count, &edges);
        if !back_edges.is_empty() {
            tracing::warn!(
                back_edges = back_edges.len(),
                "cycle in process graph; ranks are best-effort"
            );
        }
        result.back_edges = back_edges
            .iter()
            .filter_map(|&i| model.edges.get_index(i).map(|(id, _)| id.clone()))
            .collect();

        let rank_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for (node, &rank) in ranks.iter().enumerate() {
            layers[rank].push(node);
        }

        let neighbors = undirected_neighbors(node_count, &edges);
        result.crossings = self.reduce_crossings(&mut layers, &ranks, &neighbors, &edges);
        result.rank_count = rank_count;

        // Raw coordinates
        let mut raw = vec![(0.0_f64, 0.0_f64); node_count];
        for (rank, layer) in layers.iter().enumerate() {
            for (order, &node) in layer.iter().enumerate() {
                raw[node] = (
                    rank as f64 * self.config.rank_spacing,
                    order as f64 * self.config.node_spacing,
                );
            }
        }

        let xs = normalize(raw.iter().map(|p| p.0).collect());
        let ys = normalize(raw.iter().map(|p| p.1).collect());

        for (i, node) in model.nodes.values_mut().enumerate() {
            node.x = Some(xs[i]);
            node.y = Some(ys[i]);
            node.rank = Some(ranks[i]);
        }

        tracing::debug!(
            nodes = node_count,
            ranks = rank_count,
            crossings = result.crossings,
            "layout complete"
        );

        result
    }

    /// Barycenter sweeps over the layers; returns the final crossing count.
    fn reduce_crossings(
        &self,
        layers: &mut [Vec<usize>],
        ranks: &[usize],
        neighbors: &[Vec<usize>],
        edges: &[LayoutEdge],
    ) -> usize {
        let mut positions = vec![0usize; ranks.len()];
        refresh_positions(layers, &mut positions);

        let mut best = count_crossings(layers, ranks, &positions, edges);
        let mut best_layers = layers.to_vec();

        for _pass in 0..self.config.crossing_passes {
            if best == 0 {
                break;
            }
            let before = layers.to_vec();

            // Down sweep
            for rank in 1..layers.len() {
                reorder_by_barycenter(layers, rank, rank - 1, ranks, neighbors, &mut positions);
            }
            // Up sweep
            for rank in (0..layers.len().saturating_sub(1)).rev() {
                reorder_by_barycenter(layers, rank, rank + 1, ranks, neighbors, &mut positions);
            }

            let crossings = count_crossings(layers, ranks, &positions, edges);
            if crossings < best {
                best = crossings;
                best_layers = layers.to_vec();
            }
            if layers[..] == before[..] {
                break;
            }
        }

        layers.clone_from_slice(&best_layers);
        best
    }
}

/// Longest-path ranks from nodes without incoming edges.
///
/// Returns per-node ranks and the positions of edges that were ignored
/// because their target had already been released (cycle members).
/// Every node is released exactly once, so this terminates on any input.
fn assign_ranks(node_count: usize, edges: &[LayoutEdge]) -> (Vec<usize>, Vec<usize>) {
    let mut outgoing: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];
    let mut indegree = vec![0usize; node_count];
    for (pos, edge) in edges.iter().enumerate() {
        outgoing[edge.from].push((pos, edge.to));
        indegree[edge.to] += 1;
    }

    let mut ranks = vec![0usize; node_count];
    let mut released = vec![false; node_count];
    let mut released_count = 0;
    let mut back_edges = Vec::new();
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&n| indegree[n] == 0).collect();

    loop {
        while let Some(node) = queue.pop_front() {
            released[node] = true;
            released_count += 1;

            for &(pos, target) in &outgoing[node] {
                if released[target] {
                    back_edges.push(edges[pos].index);
                    continue;
                }
                ranks[target] = ranks[target].max(ranks[node] + 1);
                indegree[target] -= 1;
                if indegree[target] == 0 {
                    queue.push_back(target);
                }
            }
        }

        if released_count == node_count {
            break;
        }
        // Every remaining node waits on a cycle; release the first one
        match (0..node_count).find(|&n| !released[n]) {
            Some(blocked) => queue.push_back(blocked),
            None => break,
        }
    }

    (ranks, back_edges)
}

fn undirected_neighbors(node_count: usize, edges: &[LayoutEdge]) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); node_count];
    for edge in edges {
        if edge.from != edge.to {
            neighbors[edge.from].push(edge.to);
            neighbors[edge.to].push(edge.from);
        }
    }
    neighbors
}

fn refresh_positions(layers: &[Vec<usize>], positions: &mut [usize]) {
    for layer in layers {
        for (order, &node) in layer.iter().enumerate() {
            positions[node] = order;
        }
    }
}

/// Reorder `rank` by the mean position of each node's neighbours in `reference`.
/// Nodes with no neighbour there keep their current position as barycenter.
fn reorder_by_barycenter(
    layers: &mut [Vec<usize>],
    rank: usize,
    reference: usize,
    ranks: &[usize],
    neighbors: &[Vec<usize>],
    positions: &mut [usize],
) {
    let mut barycenters: Vec<(usize, f64)> = layers[rank]
        .iter()
        .map(|&node| {
            let (sum, count) = neighbors[node]
                .iter()
                .filter(|&&other| ranks[other] == reference)
                .fold((0.0, 0usize), |(sum, count), &other| {
                    (sum + positions[other] as f64, count + 1)
                });
            let barycenter = if count > 0 {
                sum / count as f64
            } else {
                positions[node] as f64
            };
            (node, barycenter)
        })
        .collect();

    barycenters.sort_by(|a, b| a.1.total_cmp(&b.1));

    layers[rank] = barycenters.into_iter().map(|(node, _)| node).collect();
    for (order, &node) in layers[rank].iter().enumerate() {
        positions[node] = order;
    }
}

/// Crossings between edges joining adjacent ranks.
fn count_crossings(
    layers: &[Vec<usize>],
    ranks: &[usize],
    positions: &[usize],
    edges: &[LayoutEdge],
) -> usize {
    let mut per_gap: Vec<Vec<(usize, usize)>> = vec![Vec::new(); layers.len()];
    for edge in edges {
        let (upper, lower) = if ranks[edge.from] < ranks[edge.to] {
            (edge.from, edge.to)
        } else {
            (edge.to, edge.from)
        };
        if ranks[lower] == ranks[upper] + 1 {
            per_gap[ranks[upper]].push((positions[upper], positions[lower]));
        }
    }

    per_gap
        .iter()
        .map(|segments| {
            let mut crossings = 0;
            for (i, a) in segments.iter().enumerate() {
                for b in &segments[i + 1..] {
                    if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                        crossings += 1;
                    }
                }
            }
            crossings
        })
        .sum()
}

/// Min-max scale into [0, 1]; a zero span is treated as 1.
fn normalize(values: Vec<f64>) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let divisor = if span > 0.0 { span } else { 1.0 };
    values.into_iter().map(|v| (v - min) / divisor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{Classification, GraphEdge, GraphNode, Metadata};

    fn make_test_model(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Model {
        let mut model = Model::new();
        for id in nodes {
            model.nodes.insert(
                id.to_string(),
                GraphNode::new(*id, Classification::Sample, Metadata::new()),
            );
        }
        for (id, source, target) in edges {
            model.edges.insert(
                id.to_string(),
                GraphEdge {
                    id: id.to_string(),
                    label: id.to_string(),
                    source: source.to_string(),
                    target: target.to_string(),
                    metadata: Metadata::new(),
                },
            );
        }
        model
    }

    fn position(model: &Model, id: &str) -> (f64, f64) {
        model.nodes[id].position().unwrap()
    }

    #[test]
    fn test_chain_ranks_left_to_right() {
        let mut model = make_test_model(&["A", "B", "C"], &[("P1", "A", "B"), ("P2", "B", "C")]);
        let result = LayoutEngine::new().layout(&mut model);

        assert_eq!(result.rank_count, 3);
        assert!(result.is_acyclic());
        assert_eq!(model.nodes["A"].rank, Some(0));
        assert_eq!(model.nodes["B"].rank, Some(1));
        assert_eq!(model.nodes["C"].rank, Some(2));
        assert_eq!(position(&model, "A"), (0.0, 0.0));
        assert_eq!(position(&model, "B"), (0.5, 0.0));
        assert_eq!(position(&model, "C"), (1.0, 0.0));
    }

    #[test]
    fn test_longest_path_wins() {
        // A -> B -> C and a shortcut A -> C: C sits at rank 2
        let mut model = make_test_model(
            &["A", "B", "C"],
            &[("p1", "A", "B"), ("p2", "B", "C"), ("p3", "A", "C")],
        );
        LayoutEngine::new().layout(&mut model);
        assert_eq!(model.nodes["C"].rank, Some(2));
    }

    #[test]
    fn test_single_node_collapses_to_origin() {
        let mut model = make_test_model(&["only"], &[]);
        LayoutEngine::new().layout(&mut model);
        assert_eq!(position(&model, "only"), (0.0, 0.0));
    }

    #[test]
    fn test_empty_model_is_noop() {
        let mut model = Model::new();
        let result = LayoutEngine::new().layout(&mut model);
        assert_eq!(result, LayoutResult::default());
    }

    #[test]
    fn test_cycle_terminates_with_back_edge() {
        let mut model = make_test_model(
            &["a", "b", "c"],
            &[("e1", "a", "b"), ("e2", "b", "c"), ("e3", "c", "a")],
        );
        let result = LayoutEngine::new().layout(&mut model);

        assert_eq!(result.back_edges, vec!["e3".to_string()]);
        assert_eq!(model.nodes["a"].rank, Some(0));
        assert_eq!(model.nodes["c"].rank, Some(2));
        assert!(model.is_laid_out());
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let mut model = make_test_model(&["a"], &[("loop", "a", "a")]);
        let result = LayoutEngine::new().layout(&mut model);
        assert_eq!(result.back_edges, vec!["loop".to_string()]);
        assert_eq!(position(&model, "a"), (0.0, 0.0));
    }

    #[test]
    fn test_barycenter_removes_crossing() {
        // Insertion order puts c above d, which crosses a->d and b->c
        let mut model = make_test_model(
            &["a", "b", "c", "d"],
            &[("p1", "a", "d"), ("p2", "b", "c")],
        );
        let result = LayoutEngine::new().layout(&mut model);

        assert_eq!(result.crossings, 0);
        assert!(position(&model, "d").1 < position(&model, "c").1);
    }

    #[test]
    fn test_zero_passes_keeps_insertion_order() {
        let mut model = make_test_model(
            &["a", "b", "c", "d"],
            &[("p1", "a", "d"), ("p2", "b", "c")],
        );
        let engine = LayoutEngine::with_config(LayoutConfig::default().with_crossing_passes(0));
        let result = engine.layout(&mut model);
        assert_eq!(result.crossings, 1);
        assert!(position(&model, "c").1 < position(&model, "d").1);
    }

    #[test]
    fn test_coordinates_within_unit_square() {
        let mut model = make_test_model(
            &["s1", "s2", "m1", "m2", "m3", "out"],
            &[
                ("p1", "s1", "m1"),
                ("p2", "s1", "m2"),
                ("p3", "s2", "m3"),
                ("p4", "m1", "out"),
                ("p5", "m3", "out"),
            ],
        );
        LayoutEngine::new().layout(&mut model);
        for node in model.nodes.values() {
            let (x, y) = node.position().unwrap();
            assert!((0.0..=1.0).contains(&x), "{} x={}", node.id, x);
            assert!((0.0..=1.0).contains(&y), "{} y={}", node.id, y);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let build = || {
            make_test_model(
                &["a", "b", "c", "d", "e"],
                &[("1", "a", "c"), ("2", "b", "c"), ("3", "a", "d"), ("4", "c", "e")],
            )
        };
        let mut first = build();
        let mut second = build();
        LayoutEngine::new().layout(&mut first);
        LayoutEngine::new().layout(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_rank_spacing_stays_left_to_right() {
        let mut model = make_test_model(&["A", "B"], &[("p", "A", "B")]);
        let engine = LayoutEngine::with_config(LayoutConfig::default().with_rank_spacing(-200.0));
        engine.layout(&mut model);
        assert_eq!(position(&model, "A"), (0.0, 0.0));
        assert_eq!(position(&model, "B"), (1.0, 0.0));
    }

    #[test]
    fn test_nan_spacing_yields_finite_coordinates() {
        let mut model = make_test_model(&["A", "B", "C"], &[("p1", "A", "B"), ("p2", "A", "C")]);
        let engine = LayoutEngine::with_config(
            LayoutConfig::default()
                .with_rank_spacing(f64::NAN)
                .with_node_spacing(f64::INFINITY),
        );
        engine.layout(&mut model);
        for node in model.nodes.values() {
            let (x, y) = node.position().unwrap();
            assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y), "{}", node.id);
        }
        assert_eq!(position(&model, "B"), (1.0, 0.0));
    }

    #[test]
    fn test_normalize_zero_span() {
        assert_eq!(normalize(vec![5.0, 5.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(vec![0.0, 50.0, 100.0]), vec![0.0, 0.5, 1.0]);
    }
}
