//! UI components: the AST canvas and the analyzer result views built around it.

pub mod analysis;
pub mod ast_tree;
