//! Decoded analyzer response.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::components::ast_tree::AstGraph;

pub const NO_AST_TEXT: &str = "No AST generated";

#[derive(Debug, Error)]
pub enum AnalysisError {
	#[error("failed to decode analyzer response: {0}")]
	Decode(#[from] serde_json::Error),
	/// The analyzer's own failure body, `{"detail": "..."}`.
	#[error("{0}")]
	Analyzer(String),
}

/// Table cell or trace field. Strings are kept verbatim, arrays are joined
/// with spaces, anything else is shown as JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct CellText(String);

impl From<Value> for CellText {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self(String::new()),
			Value::String(s) => Self(s),
			Value::Array(items) => Self(
				items
					.into_iter()
					.map(|item| CellText::from(item).0)
					.collect::<Vec<_>>()
					.join(" "),
			),
			other => Self(other.to_string()),
		}
	}
}

impl CellText {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CellText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraceStep {
	pub stack: CellText,
	pub input: CellText,
	pub action: CellText,
}

/// `state -> symbol -> entry`, as used by both the action and goto tables.
pub type ParseTable = BTreeMap<String, BTreeMap<String, CellText>>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
	pub grammar: Vec<String>,
	pub terminals: Vec<String>,
	pub non_terminals: Vec<String>,
	/// Item sets of the canonical LR(1) collection, keyed by state name.
	pub states: BTreeMap<String, Vec<String>>,
	pub action_table: ParseTable,
	pub goto_table: ParseTable,
	pub trace: Vec<TraceStep>,
	pub ast_graph: Option<AstGraph>,
	pub ast_string: Option<String>,
}

impl AnalysisResult {
	pub fn from_json(body: &str) -> Result<Self, AnalysisError> {
		let value: Value = serde_json::from_str(body)?;
		if let Some(detail) = failure_detail(&value) {
			return Err(AnalysisError::Analyzer(detail.to_owned()));
		}
		Ok(serde_json::from_value(value)?)
	}

	/// The graph to lay out; the built-in demo tree when the analyzer sent none.
	pub fn ast_graph_or_demo(&self) -> AstGraph {
		AstGraph::or_demo(self.ast_graph.as_ref())
	}

	pub fn ast_text(&self) -> &str {
		self.ast_string
			.as_deref()
			.filter(|s| !s.is_empty())
			.unwrap_or(NO_AST_TEXT)
	}

	/// States whose name contains `query` (case-insensitive), in natural order.
	pub fn states_matching(&self, query: &str) -> Vec<(&str, &[String])> {
		let query = query.to_lowercase();
		let mut states: Vec<(&str, &[String])> = self
			.states
			.iter()
			.filter(|(name, _)| name.to_lowercase().contains(&query))
			.map(|(name, items)| (name.as_str(), items.as_slice()))
			.collect();
		states.sort_by(|a, b| natural_cmp(a.0, b.0));
		states
	}
}

/// Only a body with `detail` and none of the result fields counts as a failure.
fn failure_detail(value: &Value) -> Option<&str> {
	let object = value.as_object()?;
	let detail = object.get("detail")?.as_str()?;
	let has_result = ["grammar", "states", "action_table", "ast_graph"]
		.iter()
		.any(|key| object.contains_key(*key));
	(!has_result).then_some(detail)
}

/// A parse table flattened for display: sorted symbol columns, states in
/// natural order, `-` for empty cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableGrid {
	pub columns: Vec<String>,
	pub rows: Vec<(String, Vec<String>)>,
}

impl TableGrid {
	pub fn from_table(table: &ParseTable) -> Self {
		let columns: Vec<String> = table
			.values()
			.flat_map(|row| row.keys().cloned())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect();

		let mut states: Vec<&String> = table.keys().collect();
		states.sort_by(|a, b| natural_cmp(a, b));
		let rows = states
			.into_iter()
			.map(|state| {
				let row = &table[state];
				let cells = columns
					.iter()
					.map(|symbol| match row.get(symbol) {
						Some(cell) if !cell.as_str().is_empty() => cell.to_string(),
						_ => "-".to_owned(),
					})
					.collect();
				(state.clone(), cells)
			})
			.collect();

		Self { columns, rows }
	}
}

/// Orders `I2` before `I10` and `2` before `10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
	natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

fn natural_key(s: &str) -> (&str, Option<u64>, &str) {
	let digits_at = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
	let (prefix, rest) = s.split_at(digits_at);
	let digits_end = rest
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(rest.len());
	let (digits, tail) = rest.split_at(digits_end);
	(prefix, digits.parse().ok(), tail)
}
