//! Tidy-tree layout of the analyzer's AST and the canvas that shows it.

mod component;
pub mod config;
mod edge;
mod error;
mod layout;
mod normalize;
mod render;
mod state;
mod types;
pub mod viewport;

pub use component::AstTreeCanvas;
pub use error::LayoutError;
pub use layout::{LayoutDiagnostics, LayoutNode, TreeLayout, compute_layout};
pub use normalize::VIRTUAL_ROOT_ID;
pub use render::PLACEHOLDER_TEXT;
pub use types::{AstGraph, GraphEdge, GraphNode, NodeId};
