use thiserror::Error;

/// Soft failures of the layout pipeline. Both render as the "no AST" placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
	/// The node list is empty.
	#[error("no AST nodes were supplied")]
	EmptyGraph,
	/// Every node is the target of some edge.
	#[error("every node has an incoming edge, so the graph has no root")]
	NoRoot,
}
