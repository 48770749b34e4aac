//! Top-down tidy-tree layout.
//!
//! Two passes over the unified tree: subtree widths bottom-up, then absolute
//! positions top-down with each parent centered over the span of its children.
//! The bounding box is accumulated during the second pass and the finished
//! geometry is translated into a padded, non-negative canvas box.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{info, warn};

use super::config::TreeLayoutConfig;
use super::error::LayoutError;
use super::normalize::{NormalizedGraph, UnifiedTree, normalize, unify_forest};
use super::types::AstGraph;

/// A placed node, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	/// Canonical node id.
	pub id: String,
	/// Text drawn in the node.
	pub label: String,
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Child ids in edge order.
	pub children: Vec<String>,
	/// Width reserved for the whole subtree.
	pub subtree_width: f64,
}

impl LayoutNode {
	/// Horizontal band `[x - w/2, x + w/2]` reserved for this subtree.
	pub fn span(&self) -> (f64, f64) {
		let half = self.subtree_width / 2.0;
		(self.x - half, self.x + half)
	}

	/// Whether the node has no laid-out children.
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}
}

/// What the layout had to leave out of a malformed graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutDiagnostics {
	/// Dangling edges plus edges that would close a cycle.
	pub dropped_edges: usize,
	/// Nodes with a parent but no path from any root; left out of the node map.
	pub unreachable_nodes: usize,
}

impl LayoutDiagnostics {
	/// Nothing was dropped.
	pub fn is_clean(&self) -> bool {
		self.dropped_edges == 0 && self.unreachable_nodes == 0
	}
}

/// Immutable layout snapshot for one analyzer result.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeLayout {
	/// Every reachable real node by id. Never contains the virtual root.
	pub node_map: BTreeMap<String, LayoutNode>,
	/// Real roots in input order.
	pub roots: Vec<String>,
	/// Canvas box width, padding included.
	pub width: f64,
	/// Canvas box height, padding included.
	pub height: f64,
	/// Distance from the box edge to the outermost node centers.
	pub padding: f64,
	/// Dropped edges and unreachable nodes.
	pub diagnostics: LayoutDiagnostics,
}

impl TreeLayout {
	/// Looks up a placed node.
	pub fn get(&self, id: &str) -> Option<&LayoutNode> {
		self.node_map.get(id)
	}

	/// Parent/child pairs, one per laid-out edge.
	pub fn edges(&self) -> impl Iterator<Item = (&LayoutNode, &LayoutNode)> + '_ {
		self.node_map.values().flat_map(move |parent| {
			parent
				.children
				.iter()
				.filter_map(move |id| self.node_map.get(id).map(|child| (parent, child)))
		})
	}
}

/// Runs normalization, forest unification, both layout passes and the
/// finisher. Fails softly on an empty graph or one without a root.
pub fn compute_layout(graph: &AstGraph, config: &TreeLayoutConfig) -> Result<TreeLayout, LayoutError> {
	let tree = normalize(graph).and_then(unify_forest)?;
	let mut engine = TidyTree::new(&tree, config);
	let bounds = engine.run();
	let layout = engine.finish(bounds);

	info!(
		"AST layout: {} nodes, {:.0}x{:.0}",
		layout.node_map.len(),
		layout.width,
		layout.height
	);
	if !layout.diagnostics.is_clean() {
		warn!(
			"AST graph is malformed: {} edges dropped, {} nodes unreachable",
			layout.diagnostics.dropped_edges, layout.diagnostics.unreachable_nodes
		);
	}
	Ok(layout)
}

/// Running extent of the placed nodes, in raw (untranslated) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
	min_x: f64,
	max_x: f64,
	max_y: f64,
}

impl Bounds {
	fn empty() -> Self {
		Self {
			min_x: f64::INFINITY,
			max_x: f64::NEG_INFINITY,
			max_y: f64::NEG_INFINITY,
		}
	}

	fn include(self, x: f64, y: f64) -> Self {
		Self {
			min_x: self.min_x.min(x),
			max_x: self.max_x.max(x),
			max_y: self.max_y.max(y),
		}
	}
}

struct TidyTree<'a> {
	tree: &'a UnifiedTree,
	config: &'a TreeLayoutConfig,
	nodes: HashMap<String, LayoutNode>,
	back_edges: usize,
}

impl<'a> TidyTree<'a> {
	fn new(tree: &'a UnifiedTree, config: &'a TreeLayoutConfig) -> Self {
		Self {
			tree,
			config,
			nodes: HashMap::with_capacity(tree.graph.order.len() + 1),
			back_edges: 0,
		}
	}

	fn run(&mut self) -> Bounds {
		let tree = self.tree;
		let root = tree.root.as_str();
		self.measure(root, &mut HashSet::new());

		if tree.virtual_root {
			// Sits one level above the real roots so they land on the top margin.
			// Its own position never reaches the bounds.
			let y = -self.config.vertical_spacing;
			if let Some(node) = self.nodes.get_mut(root) {
				node.x = 0.0;
				node.y = y;
			}
			self.place_children(root, Bounds::empty())
		} else {
			self.place(root, 0.0, 0.0, Bounds::empty())
		}
	}

	/// Pass 1. Memoized, so a node reached twice is measured once.
	fn measure(&mut self, id: &'a str, path: &mut HashSet<&'a str>) -> f64 {
		if let Some(node) = self.nodes.get(id) {
			return node.subtree_width;
		}

		let graph: &'a NormalizedGraph = &self.tree.graph;
		path.insert(id);
		let mut children = Vec::new();
		let mut width = 0.0;
		for child in graph.children.get(id).into_iter().flatten() {
			if path.contains(child.as_str()) {
				self.back_edges += 1;
				continue;
			}
			width += self.measure(child, path);
			children.push(child.clone());
		}
		path.remove(id);

		let subtree_width = if children.is_empty() {
			self.config.horizontal_spacing
		} else {
			width
		};
		self.nodes.insert(
			id.to_owned(),
			LayoutNode {
				id: id.to_owned(),
				label: graph.labels.get(id).cloned().unwrap_or_default(),
				x: 0.0,
				y: 0.0,
				children,
				subtree_width,
			},
		);
		subtree_width
	}

	/// Pass 2.
	fn place(&mut self, id: &str, x: f64, y: f64, bounds: Bounds) -> Bounds {
		let Some(node) = self.nodes.get_mut(id) else {
			return bounds;
		};
		node.x = x;
		node.y = y;
		self.place_children(id, bounds.include(x, y))
	}

	fn place_children(&mut self, id: &str, mut bounds: Bounds) -> Bounds {
		let Some(node) = self.nodes.get(id) else {
			return bounds;
		};
		let (x, child_y) = (node.x, node.y + self.config.vertical_spacing);
		let mut cursor = x - node.subtree_width / 2.0;
		let children = node.children.clone();

		for child in &children {
			let width = self.nodes.get(child).map_or(0.0, |c| c.subtree_width);
			bounds = self.place(child, cursor + width / 2.0, child_y, bounds);
			cursor += width;
		}
		bounds
	}

	/// Translates into the padded canvas box and strips the virtual root.
	fn finish(self, bounds: Bounds) -> TreeLayout {
		let tree = self.tree;
		let padding = self.config.padding();
		let offset_x = padding - bounds.min_x;
		let width = (bounds.max_x - bounds.min_x) + 2.0 * padding;
		let height = bounds.max_y + 2.0 * padding;

		let virtual_root = tree.virtual_root.then_some(tree.root.as_str());
		let node_map: BTreeMap<String, LayoutNode> = self
			.nodes
			.into_iter()
			.filter(|(id, _)| Some(id.as_str()) != virtual_root)
			.map(|(id, mut node)| {
				node.x += offset_x;
				node.y += padding;
				(id, node)
			})
			.collect();

		let graph = &tree.graph;
		TreeLayout {
			diagnostics: LayoutDiagnostics {
				dropped_edges: graph.dropped_edges + self.back_edges,
				unreachable_nodes: graph.order.len().saturating_sub(node_map.len()),
			},
			node_map,
			roots: tree.roots.clone(),
			width,
			height,
			padding,
		}
	}
}
