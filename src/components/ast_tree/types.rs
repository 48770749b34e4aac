use std::fmt;

use serde::Deserialize;

/// Canonical node key. Numeric and string ids that print the same are the same node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawId")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Signed(i64),
	Unsigned(u64),
	Float(f64),
}

impl From<RawId> for NodeId {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Text(s) => Self(s),
			RawId::Signed(n) => Self(n.to_string()),
			RawId::Unsigned(n) => Self(n.to_string()),
			// 2.0 and 2 must collide
			RawId::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Self((f as i64).to_string()),
			RawId::Float(f) => Self(f.to_string()),
		}
	}
}

impl NodeId {
	/// The canonical string form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl From<u32> for NodeId {
	fn from(n: u32) -> Self {
		Self(n.to_string())
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One AST node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Node key, unique within a graph.
	pub id: NodeId,
	/// Grammar symbol or token text drawn inside the node.
	#[serde(default)]
	pub label: String,
}

/// Parent to child link. Child order follows edge order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	/// Parent id.
	pub from: NodeId,
	/// Child id.
	pub to: NodeId,
}

/// Raw `ast_graph` payload as produced by the analyzer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AstGraph {
	/// Nodes in input order; the first occurrence of an id fixes its position.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Parent to child edges.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl AstGraph {
	/// Builds a graph from already-typed parts.
	pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		Self { nodes, edges }
	}

	/// Parse tree of `c d d` under `S -> C C`, `C -> c C`, `C -> d`.
	/// Shown when the analyzer sent no graph.
	pub fn demo() -> Self {
		let labels = ["S", "C", "c", "C", "d", "C", "d"];
		let nodes = labels
			.iter()
			.enumerate()
			.map(|(i, label)| GraphNode {
				id: NodeId::from(i as u32),
				label: (*label).to_owned(),
			})
			.collect();
		let edges = [(0, 1), (1, 2), (1, 3), (3, 4), (0, 5), (5, 6)]
			.into_iter()
			.map(|(from, to): (u32, u32)| GraphEdge {
				from: from.into(),
				to: to.into(),
			})
			.collect();
		Self { nodes, edges }
	}

	/// Falls back to [`AstGraph::demo`] when no graph is available.
	pub fn or_demo(graph: Option<&AstGraph>) -> Self {
		graph.cloned().unwrap_or_else(Self::demo)
	}
}
