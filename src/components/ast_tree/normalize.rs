//! Turns the analyzer's flat node/edge lists into a single-rooted adjacency structure.

use std::collections::{HashMap, HashSet};

use super::error::LayoutError;
use super::types::AstGraph;

/// Key of the synthetic parent inserted above a forest. Never rendered.
pub const VIRTUAL_ROOT_ID: &str = "\u{0}virtual-root";

#[derive(Clone, Debug, Default)]
pub struct NormalizedGraph {
	/// Distinct node ids in input order.
	pub order: Vec<String>,
	pub labels: HashMap<String, String>,
	/// Children per node in first-seen edge order. Duplicate edges stay duplicated.
	pub children: HashMap<String, Vec<String>>,
	/// Every distinct edge target, including targets of dropped edges.
	pub has_parent: HashSet<String>,
	/// Edges whose `from` or `to` is not a known node.
	pub dropped_edges: usize,
}

/// A normalized graph with exactly one entry point.
#[derive(Clone, Debug)]
pub struct UnifiedTree {
	pub graph: NormalizedGraph,
	pub root: String,
	/// The real roots, in input order. Equal to `[root]` unless a virtual root was added.
	pub roots: Vec<String>,
	pub virtual_root: bool,
}

pub fn normalize(raw: &AstGraph) -> Result<NormalizedGraph, LayoutError> {
	if raw.nodes.is_empty() {
		return Err(LayoutError::EmptyGraph);
	}

	let mut graph = NormalizedGraph {
		order: Vec::with_capacity(raw.nodes.len()),
		labels: HashMap::with_capacity(raw.nodes.len()),
		..Default::default()
	};
	for node in &raw.nodes {
		let id = node.id.as_str();
		// a repeated id keeps its first position and takes the latest label
		if graph.labels.insert(id.to_owned(), node.label.clone()).is_none() {
			graph.order.push(id.to_owned());
			graph.children.insert(id.to_owned(), Vec::new());
		}
	}

	for edge in &raw.edges {
		let to = edge.to.as_str();
		// every target counts as parented, even when the edge itself is dropped
		graph.has_parent.insert(to.to_owned());
		if !graph.labels.contains_key(to) {
			graph.dropped_edges += 1;
			continue;
		}
		let Some(children) = graph.children.get_mut(edge.from.as_str()) else {
			graph.dropped_edges += 1;
			continue;
		};
		children.push(to.to_owned());
	}

	Ok(graph)
}

pub fn unify_forest(mut graph: NormalizedGraph) -> Result<UnifiedTree, LayoutError> {
	let roots: Vec<String> = graph
		.order
		.iter()
		.filter(|id| !graph.has_parent.contains(*id))
		.cloned()
		.collect();

	match roots.as_slice() {
		[] => Err(LayoutError::NoRoot),
		[root] => Ok(UnifiedTree {
			root: root.clone(),
			roots,
			graph,
			virtual_root: false,
		}),
		_ => {
			graph.labels.insert(VIRTUAL_ROOT_ID.to_owned(), String::new());
			graph.children.insert(VIRTUAL_ROOT_ID.to_owned(), roots.clone());
			Ok(UnifiedTree {
				root: VIRTUAL_ROOT_ID.to_owned(),
				roots,
				graph,
				virtual_root: true,
			})
		}
	}
}
