//! Layout geometry and viewport limits.

/// Radius of a drawn node.
pub const NODE_RADIUS: f64 = 30.0;
/// Clearance kept between the outermost nodes and the canvas edge.
pub const NODE_MARGIN: f64 = 20.0;
/// Band width of a single leaf.
pub const HORIZONTAL_SPACING: f64 = 80.0;
/// Distance between tree levels.
pub const VERTICAL_SPACING: f64 = 120.0;

/// Lowest zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Highest zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.08;
/// Zoom change per toolbar click.
pub const BUTTON_ZOOM_STEP: f64 = 0.2;
/// Duration of the eased zoom, in seconds.
pub const ZOOM_TRANSITION_SECS: f64 = 0.2;

/// Geometry of the tidy-tree layout, in layout units (canvas pixels at zoom 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeLayoutConfig {
	/// Drawn node radius; also the length trimmed off each edge end.
	pub node_radius: f64,
	/// Extra clearance around the tree, on top of the radius.
	pub margin: f64,
	/// Width of a leaf's band; every subtree width is a multiple of it.
	pub horizontal_spacing: f64,
	/// Vertical distance between a parent and its children.
	pub vertical_spacing: f64,
}

impl Default for TreeLayoutConfig {
	fn default() -> Self {
		Self {
			node_radius: NODE_RADIUS,
			margin: NODE_MARGIN,
			horizontal_spacing: HORIZONTAL_SPACING,
			vertical_spacing: VERTICAL_SPACING,
		}
	}
}

impl TreeLayoutConfig {
	/// Distance from the canvas edge to the nearest node center.
	pub fn padding(&self) -> f64 {
		self.node_radius + self.margin
	}
}

/// Zoom limits and step sizes of the canvas viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	/// Lower zoom clamp.
	pub min_zoom: f64,
	/// Upper zoom clamp.
	pub max_zoom: f64,
	/// Zoom change per wheel notch.
	pub wheel_step: f64,
	/// Zoom change per zoom button click.
	pub button_step: f64,
	/// Length of the eased zoom; zero snaps.
	pub transition_secs: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: MIN_ZOOM,
			max_zoom: MAX_ZOOM,
			wheel_step: WHEEL_ZOOM_STEP,
			button_step: BUTTON_ZOOM_STEP,
			transition_secs: ZOOM_TRANSITION_SECS,
		}
	}
}
