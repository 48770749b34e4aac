//! Property tests for the tidy-tree layout.
//!
//! 1. Identical input gives identical coordinates.
//! 2. Sibling subtree spans never overlap.
//! 3. A parent is centered over its children's combined span.
//! 4. Subtree widths add up; leaves get exactly one spacing unit.
//! 5. Every node lies inside the padded canvas box.
//! 6. Forests lay out as siblings without exposing the virtual root.
//!
//! 1-5 are also checked on noisy input: dangling edges in both directions and
//! repeated node entries. Duplicate edges keep 1, 4 and 5.

#![allow(unused_crate_dependencies)]

use lr1_ast_viewer::ast_tree::config::TreeLayoutConfig;
use lr1_ast_viewer::ast_tree::{
	AstGraph, GraphEdge, GraphNode, LayoutError, NodeId, TreeLayout, VIRTUAL_ROOT_ID, compute_layout,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const EPS: f64 = 1e-6;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Node `i + 1` either hangs below an earlier node or starts a new tree.
fn forest_strategy() -> impl Strategy<Value = AstGraph> {
	prop::collection::vec((any::<prop::sample::Index>(), prop::bool::weighted(0.1)), 0..80).prop_map(
		|links| {
			let mut nodes = vec![GraphNode {
				id: 0u32.into(),
				label: "n0".to_owned(),
			}];
			let mut edges = Vec::new();
			for (i, (parent, detached)) in links.into_iter().enumerate() {
				let id = (i + 1) as u32;
				nodes.push(GraphNode {
					id: id.into(),
					label: format!("n{id}"),
				});
				if !detached {
					edges.push(GraphEdge {
						from: (parent.index(i + 1) as u32).into(),
						to: id.into(),
					});
				}
			}
			AstGraph::new(nodes, edges)
		},
	)
}

/// Noise on top of a forest. Returns the graph and how many edges are dangling.
/// Node 0 never gains a parent, so a root always survives.
fn noisy_forest_strategy() -> impl Strategy<Value = (AstGraph, usize)> {
	(
		forest_strategy(),
		prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..6),
		prop::collection::vec(any::<prop::sample::Index>(), 0..6),
	)
		.prop_map(|(mut graph, dangling, repeats)| {
			let n = graph.nodes.len();
			for (k, (target, incoming)) in dangling.iter().enumerate() {
				let ghost = NodeId::from(format!("ghost{k}").as_str());
				let edge = if *incoming {
					GraphEdge {
						from: ghost,
						to: ((1 + target.index(n.max(2) - 1)) as u32).into(),
					}
				} else {
					GraphEdge {
						from: (target.index(n) as u32).into(),
						to: ghost,
					}
				};
				graph.edges.push(edge);
			}
			for index in repeats {
				let id = graph.nodes[index.index(n)].id.clone();
				graph.nodes.push(GraphNode {
					id,
					label: "again".to_owned(),
				});
			}
			(graph, dangling.len())
		})
}

/// A forest where some edges appear more than once.
fn duplicated_edges_strategy() -> impl Strategy<Value = AstGraph> {
	(forest_strategy(), prop::collection::vec(any::<prop::sample::Index>(), 1..6)).prop_map(
		|(mut graph, picks)| {
			if !graph.edges.is_empty() {
				for pick in picks {
					let edge = graph.edges[pick.index(graph.edges.len())].clone();
					graph.edges.push(edge);
				}
			}
			graph
		},
	)
}

fn layout(graph: &AstGraph) -> TreeLayout {
	compute_layout(graph, &TreeLayoutConfig::default()).expect("node 0 is always a root")
}

fn check_no_overlap(l: &TreeLayout) -> Result<(), TestCaseError> {
	for node in l.node_map.values() {
		for pair in node.children.windows(2) {
			let left = l.get(&pair[0]).unwrap().span();
			let right = l.get(&pair[1]).unwrap().span();
			prop_assert!(left.1 <= right.0 + EPS, "{:?} overlaps {:?}", left, right);
		}
	}
	let roots: Vec<_> = l.roots.iter().filter_map(|id| l.get(id)).map(|n| n.span()).collect();
	for pair in roots.windows(2) {
		prop_assert!(pair[0].1 <= pair[1].0 + EPS);
	}
	Ok(())
}

fn check_centering(l: &TreeLayout) -> Result<(), TestCaseError> {
	for node in l.node_map.values().filter(|n| !n.is_leaf()) {
		let first = l.get(&node.children[0]).unwrap().span();
		let last = l.get(node.children.last().unwrap()).unwrap().span();
		prop_assert!((node.x - (first.0 + last.1) / 2.0).abs() < EPS);
	}
	Ok(())
}

fn check_widths(l: &TreeLayout) -> Result<(), TestCaseError> {
	let cfg = TreeLayoutConfig::default();
	for node in l.node_map.values() {
		if node.is_leaf() {
			prop_assert_eq!(node.subtree_width, cfg.horizontal_spacing);
		} else {
			let sum: f64 = node.children.iter().map(|c| l.get(c).unwrap().subtree_width).sum();
			prop_assert!((node.subtree_width - sum).abs() < EPS);
		}
	}
	Ok(())
}

fn check_bounds(l: &TreeLayout) -> Result<(), TestCaseError> {
	prop_assert!(l.width >= 2.0 * l.padding);
	prop_assert!(l.height >= 2.0 * l.padding);
	for node in l.node_map.values() {
		prop_assert!(node.x >= l.padding - EPS && node.x <= l.width - l.padding + EPS);
		prop_assert!(node.y >= l.padding - EPS && node.y <= l.height - l.padding + EPS);
	}
	Ok(())
}

proptest! {
	#[test]
	fn layout_is_deterministic(graph in forest_strategy()) {
		prop_assert_eq!(layout(&graph), layout(&graph));
	}

	#[test]
	fn sibling_spans_do_not_overlap(graph in forest_strategy()) {
		check_no_overlap(&layout(&graph))?;
	}

	#[test]
	fn parents_are_centered(graph in forest_strategy()) {
		check_centering(&layout(&graph))?;
	}

	#[test]
	fn subtree_widths_are_conserved(graph in forest_strategy()) {
		check_widths(&layout(&graph))?;
	}

	#[test]
	fn nodes_stay_inside_padded_box(graph in forest_strategy()) {
		check_bounds(&layout(&graph))?;
	}

	#[test]
	fn forests_keep_every_real_node(graph in forest_strategy()) {
		let l = layout(&graph);
		prop_assert_eq!(l.node_map.len(), graph.nodes.len());
		prop_assert!(l.get(VIRTUAL_ROOT_ID).is_none());
		prop_assert!(l.diagnostics.is_clean());
		let top = l.get(&l.roots[0]).unwrap().y;
		for root in &l.roots {
			prop_assert_eq!(l.get(root).unwrap().y, top);
		}
	}

	#[test]
	fn noisy_input_keeps_the_tree_invariants((graph, _) in noisy_forest_strategy()) {
		let l = layout(&graph);
		prop_assert_eq!(&l, &layout(&graph));
		check_no_overlap(&l)?;
		check_centering(&l)?;
		check_widths(&l)?;
		check_bounds(&l)?;
		prop_assert!(l.get(VIRTUAL_ROOT_ID).is_none());
	}

	#[test]
	fn noisy_input_is_fully_accounted_for((graph, dangling) in noisy_forest_strategy()) {
		let l = layout(&graph);
		let distinct: std::collections::HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		prop_assert_eq!(l.diagnostics.dropped_edges, dangling);
		prop_assert_eq!(l.node_map.len() + l.diagnostics.unreachable_nodes, distinct.len());
		for node in graph.nodes.iter().filter(|n| n.label == "again") {
			if let Some(placed) = l.get(node.id.as_str()) {
				prop_assert_eq!(placed.label.as_str(), "again");
			}
		}
	}

	#[test]
	fn duplicate_edges_keep_widths_and_bounds(graph in duplicated_edges_strategy()) {
		let l = layout(&graph);
		prop_assert_eq!(&l, &layout(&graph));
		check_widths(&l)?;
		check_bounds(&l)?;
	}
}

#[test]
fn edge_from_unknown_node_still_claims_its_target() {
	let cfg = TreeLayoutConfig::default();
	let lone: AstGraph =
		serde_json::from_str(r#"{"nodes":[{"id":"b","label":"B"}],"edges":[{"from":"zz","to":"b"}]}"#).unwrap();
	assert_eq!(compute_layout(&lone, &cfg), Err(LayoutError::NoRoot));

	let pair: AstGraph = serde_json::from_str(
		r#"{"nodes":[{"id":"a","label":"A"},{"id":"b","label":"B"}],"edges":[{"from":"zz","to":"b"}]}"#,
	)
	.unwrap();
	let l = compute_layout(&pair, &cfg).unwrap();
	assert_eq!(l.roots, vec!["a"]);
	assert_eq!(l.node_map.len(), 1);
	assert_eq!(l.diagnostics.dropped_edges, 1);
	assert_eq!(l.diagnostics.unreachable_nodes, 1);
}

#[test]
fn two_isolated_roots_are_centered_siblings() {
	let graph: AstGraph =
		serde_json::from_str(r#"{"nodes":[{"id":"A","label":"A"},{"id":"B","label":"B"}],"edges":[]}"#).unwrap();
	let l = layout(&graph);
	let (a, b) = (l.get("A").unwrap(), l.get("B").unwrap());
	assert_eq!(a.y, b.y);
	assert!(a.span().1 <= b.span().0);
	assert_eq!(l.node_map.len(), 2);
}

#[test]
fn analyzer_payload_with_numeric_ids_lays_out() {
	let graph: AstGraph = serde_json::from_str(
		r#"{"nodes":[{"id":0,"label":"S"},{"id":1,"label":"C"},{"id":2,"label":"c"}],
		    "edges":[{"from":0,"to":1},{"from":1,"to":2}]}"#,
	)
	.unwrap();
	let cfg = TreeLayoutConfig::default();
	let l = layout(&graph);
	assert_eq!(l.get("0").unwrap().x, l.get("2").unwrap().x);
	assert_eq!(l.height, 2.0 * cfg.vertical_spacing + 2.0 * cfg.padding());
}
