use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::edge::trim_segment;
use super::layout::TreeLayout;
use super::state::AstViewState;

/// Drawn in place of the tree when no layout could be computed.
pub const PLACEHOLDER_TEXT: &str = "No AST generated for this input";

const BACKGROUND: &str = "#f4faff";
const ACCENT: (u8, u8, u8) = (14, 165, 233);
const GRADIENT_START: &str = "#0ea5e9";
const GRADIENT_END: &str = "#06b6d4";

fn accent(alpha: f64) -> String {
	format!("rgba({}, {}, {}, {})", ACCENT.0, ACCENT.1, ACCENT.2, alpha)
}

pub fn render(state: &AstViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let layout = match &state.layout {
		Ok(layout) => layout,
		Err(_) => return draw_placeholder(state, ctx),
	};

	let (pan, zoom, fit) = (state.viewport.pan, state.shown_zoom.shown, state.fit());
	ctx.save();
	// translate(pan) scale(zoom), then the fit of the layout box into the canvas
	let _ = ctx.translate(pan.0, pan.1);
	let _ = ctx.scale(zoom, zoom);
	let _ = ctx.translate(fit.dx, fit.dy);
	let _ = ctx.scale(fit.scale, fit.scale);
	draw_edges(state, layout, ctx);
	draw_nodes(state, layout, ctx);
	ctx.restore();
}

fn draw_edges(state: &AstViewState, layout: &TreeLayout, ctx: &CanvasRenderingContext2d) {
	let radius = state.layout_config.node_radius;
	for (parent, child) in layout.edges() {
		let ((x1, y1), (x2, y2)) = trim_segment((parent.x, parent.y), (child.x, child.y), radius);
		let highlighted = state.is_hovered(&parent.id) || state.is_hovered(&child.id);
		let (alpha, width) = if highlighted { (1.0, 3.0) } else { (0.6, 2.0) };

		ctx.set_stroke_style_str(&accent(alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &AstViewState, layout: &TreeLayout, ctx: &CanvasRenderingContext2d) {
	let radius = state.layout_config.node_radius;
	ctx.set_font("600 12px monospace");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in layout.node_map.values() {
		let (x, y) = (node.x, node.y);
		let hovered = state.is_hovered(&node.id);

		let gradient = ctx.create_linear_gradient(x - radius, y - radius, x + radius, y + radius);
		let _ = gradient.add_color_stop(0.0, GRADIENT_START);
		let _ = gradient.add_color_stop(1.0, GRADIENT_END);
		ctx.set_global_alpha(if hovered { 1.0 } else { 0.9 });
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_stroke_style_str(&accent(0.3));
		ctx.set_line_width(2.0);
		ctx.stroke();

		if hovered {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(4.0),
				&JsValue::from_f64(3.0),
			));
			ctx.set_stroke_style_str(&accent(0.9));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 4.0, 0.0, 2.0 * PI);
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&node.label, x, y);
	}
}

fn draw_placeholder(state: &AstViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(15, 23, 42, 0.5)");
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(PLACEHOLDER_TEXT, state.width / 2.0, state.height / 2.0);
}
