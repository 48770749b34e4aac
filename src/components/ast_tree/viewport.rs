//! Pan/zoom/drag state for the AST canvas.
//!
//! All transitions are pure: `(state, event) -> state`. The canvas component
//! feeds DOM events in and reads `translate(pan) scale(zoom)` back out; the
//! layout itself is never touched.

use log::debug;

use super::config::ViewportConfig;

/// Input to the viewport. Pointer coordinates are canvas-relative pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
	/// Starts a drag when `primary` is set; other buttons are ignored.
	PointerDown {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
		/// Left button.
		primary: bool,
	},
	/// Pans while dragging.
	PointerMove {
		/// Pointer x.
		x: f64,
		/// Pointer y.
		y: f64,
	},
	/// Ends a drag.
	PointerUp,
	/// Ends a drag, like [`ViewportEvent::PointerUp`].
	PointerLeave,
	/// One wheel notch.
	Wheel {
		/// Positive zooms out, negative zooms in, zero does nothing.
		delta_y: f64,
	},
	/// Toolbar zoom in.
	ZoomIn,
	/// Toolbar zoom out.
	ZoomOut,
	/// Back to zoom 1 and no pan.
	Reset,
}

/// User-controlled view transform, `translate(pan) scale(zoom)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
	/// Target zoom, always within the configured clamp.
	pub zoom: f64,
	/// Canvas translation in pixels.
	pub pan: (f64, f64),
	/// A primary-button drag is in progress.
	pub is_dragging: bool,
	/// Pointer position at drag start minus the pan at that moment.
	pub drag_anchor: (f64, f64),
}

impl Default for ViewportState {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan: (0.0, 0.0),
			is_dragging: false,
			drag_anchor: (0.0, 0.0),
		}
	}
}

impl ViewportState {
	/// The transition function of the viewport.
	pub fn apply(self, event: ViewportEvent, config: &ViewportConfig) -> Self {
		match event {
			ViewportEvent::PointerDown { x, y, primary: true } => Self {
				is_dragging: true,
				drag_anchor: (x - self.pan.0, y - self.pan.1),
				..self
			},
			ViewportEvent::PointerDown { primary: false, .. } => self,
			// Derived from the anchor, not accumulated, so long drags cannot drift.
			ViewportEvent::PointerMove { x, y } if self.is_dragging => Self {
				pan: (x - self.drag_anchor.0, y - self.drag_anchor.1),
				..self
			},
			ViewportEvent::PointerMove { .. } => self,
			ViewportEvent::PointerUp | ViewportEvent::PointerLeave => Self {
				is_dragging: false,
				..self
			},
			ViewportEvent::Wheel { delta_y } if delta_y > 0.0 => self.zoom_by(-config.wheel_step, config),
			ViewportEvent::Wheel { delta_y } if delta_y < 0.0 => self.zoom_by(config.wheel_step, config),
			ViewportEvent::Wheel { .. } => self,
			ViewportEvent::ZoomIn => self.zoom_by(config.button_step, config),
			ViewportEvent::ZoomOut => self.zoom_by(-config.button_step, config),
			ViewportEvent::Reset => {
				debug!("viewport reset");
				Self {
					zoom: 1.0,
					pan: (0.0, 0.0),
					..self
				}
			}
		}
	}

	/// Same as applying [`ViewportEvent::ZoomIn`].
	pub fn zoom_in(self, config: &ViewportConfig) -> Self {
		self.apply(ViewportEvent::ZoomIn, config)
	}

	/// Same as applying [`ViewportEvent::ZoomOut`].
	pub fn zoom_out(self, config: &ViewportConfig) -> Self {
		self.apply(ViewportEvent::ZoomOut, config)
	}

	/// Same as applying [`ViewportEvent::Reset`].
	pub fn reset_view(self, config: &ViewportConfig) -> Self {
		self.apply(ViewportEvent::Reset, config)
	}

	/// Zoom is anchored at the canvas origin; pan is left alone.
	fn zoom_by(self, step: f64, config: &ViewportConfig) -> Self {
		Self {
			zoom: (self.zoom + step).clamp(config.min_zoom, config.max_zoom),
			..self
		}
	}
}

/// Maps `t` in `[0, 1]` onto a curve that starts fast and settles at 1.
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// The zoom actually drawn. Follows [`ViewportState::zoom`] with a short
/// ease-out, except while dragging, where it snaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransition {
	/// Zoom to draw this frame.
	pub shown: f64,
	from: f64,
	target: f64,
	elapsed: f64,
}

impl ZoomTransition {
	/// A transition already settled at `zoom`.
	pub fn new(zoom: f64) -> Self {
		Self {
			shown: zoom,
			from: zoom,
			target: zoom,
			elapsed: 0.0,
		}
	}

	/// Advances by `dt` seconds toward the state's zoom, restarting from the
	/// shown value whenever the target changes.
	pub fn tick(&mut self, state: &ViewportState, dt: f64, config: &ViewportConfig) {
		if state.is_dragging || config.transition_secs <= 0.0 {
			*self = Self::new(state.zoom);
			return;
		}
		if state.zoom != self.target {
			self.from = self.shown;
			self.target = state.zoom;
			self.elapsed = 0.0;
		}
		self.elapsed = (self.elapsed + dt).min(config.transition_secs);
		let t = ease_out_cubic(self.elapsed / config.transition_secs);
		self.shown = if t >= 1.0 {
			self.target
		} else {
			self.from + (self.target - self.from) * t
		};
	}
}

/// Uniform scale and centering offset that fit the layout box into the canvas
/// ("meet"), applied underneath the viewport transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFit {
	/// Uniform scale from layout units to canvas pixels.
	pub scale: f64,
	/// Horizontal centering offset.
	pub dx: f64,
	/// Vertical centering offset.
	pub dy: f64,
}

impl SceneFit {
	/// Largest scale that shows all of `content` inside `view`, centered.
	/// Degenerate sizes give the identity.
	pub fn meet(content: (f64, f64), view: (f64, f64)) -> Self {
		let (cw, ch) = content;
		let (vw, vh) = view;
		if cw <= 0.0 || ch <= 0.0 || vw <= 0.0 || vh <= 0.0 {
			return Self {
				scale: 1.0,
				dx: 0.0,
				dy: 0.0,
			};
		}
		let scale = (vw / cw).min(vh / ch);
		Self {
			scale,
			dx: (vw - cw * scale) / 2.0,
			dy: (vh - ch * scale) / 2.0,
		}
	}
}

/// Maps a canvas-relative pointer position back into layout coordinates.
pub fn screen_to_layout(point: (f64, f64), pan: (f64, f64), zoom: f64, fit: &SceneFit) -> (f64, f64) {
	let (vx, vy) = ((point.0 - pan.0) / zoom, (point.1 - pan.1) / zoom);
	((vx - fit.dx) / fit.scale, (vy - fit.dy) / fit.scale)
}
