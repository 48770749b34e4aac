use std::sync::Arc;

use log::debug;

use super::config::{TreeLayoutConfig, ViewportConfig};
use super::error::LayoutError;
use super::layout::TreeLayout;
use super::viewport::{SceneFit, ViewportEvent, ViewportState, ZoomTransition, screen_to_layout};

pub type LayoutSnapshot = Result<Arc<TreeLayout>, LayoutError>;

/// Everything the animation loop needs to draw one frame.
pub struct AstViewState {
	pub layout: LayoutSnapshot,
	pub viewport: ViewportState,
	pub shown_zoom: ZoomTransition,
	pub hover: Option<String>,
	pub layout_config: TreeLayoutConfig,
	pub viewport_config: ViewportConfig,
	pub width: f64,
	pub height: f64,
}

impl AstViewState {
	pub fn new(
		layout: LayoutSnapshot,
		layout_config: TreeLayoutConfig,
		viewport_config: ViewportConfig,
		width: f64,
		height: f64,
	) -> Self {
		let viewport = ViewportState::default();
		Self {
			layout,
			shown_zoom: ZoomTransition::new(viewport.zoom),
			viewport,
			hover: None,
			layout_config,
			viewport_config,
			width,
			height,
		}
	}

	/// Swaps in a new layout snapshot. The viewport is left as the user set it.
	pub fn set_layout(&mut self, layout: LayoutSnapshot) {
		if let Err(err) = &layout {
			debug!("AST placeholder shown: {err}");
		}
		self.layout = layout;
		self.hover = None;
	}

	pub fn apply(&mut self, event: ViewportEvent) {
		self.viewport = self.viewport.apply(event, &self.viewport_config);
		if matches!(event, ViewportEvent::PointerLeave) {
			self.hover = None;
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.shown_zoom.tick(&self.viewport, dt, &self.viewport_config);
	}

	pub fn fit(&self) -> SceneFit {
		match &self.layout {
			Ok(layout) => SceneFit::meet((layout.width, layout.height), (self.width, self.height)),
			Err(_) => SceneFit::meet((self.width, self.height), (self.width, self.height)),
		}
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let layout = self.layout.as_ref().ok()?;
		let (lx, ly) = screen_to_layout((sx, sy), self.viewport.pan, self.shown_zoom.shown, &self.fit());
		let radius = self.layout_config.node_radius;
		layout
			.node_map
			.values()
			.find(|node| {
				let (dx, dy) = (node.x - lx, node.y - ly);
				dx * dx + dy * dy <= radius * radius
			})
			.map(|node| node.id.clone())
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		self.hover = node;
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.hover.as_deref() == Some(id)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
