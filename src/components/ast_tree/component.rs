use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::config::{TreeLayoutConfig, ViewportConfig};
use super::layout::compute_layout;
use super::render;
use super::state::AstViewState;
use super::types::AstGraph;
use super::viewport::ViewportEvent;

type SharedState = Rc<RefCell<Option<AstViewState>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser callbacks registered by one mounted canvas.
#[derive(Clone, Default)]
struct Callbacks {
	animate: SharedClosure,
	resize: SharedClosure,
	frame: Rc<Cell<Option<i32>>>,
}

impl Callbacks {
	fn request_frame(&self) {
		if let (Some(cb), Some(window)) = (&*self.animate.borrow(), web_sys::window()) {
			self.frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	/// Cancels the pending frame and unregisters the resize listener, so the
	/// window never calls into closures freed with the component.
	fn detach(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(id) = self.frame.take() {
			let _ = window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.resize.borrow_mut().take() {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.animate.borrow_mut().take();
	}
}

fn canvas_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn parent_width(canvas: &HtmlCanvasElement) -> Option<f64> {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
}

fn set_cursor(canvas_ref: NodeRef<Canvas>, dragging: bool) {
	if let Some(canvas) = canvas_ref.get_untracked() {
		let canvas: HtmlCanvasElement = canvas.into();
		let cursor = if dragging { "grabbing" } else { "grab" };
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

fn dispatch(state: &SharedState, event: ViewportEvent) {
	if let Some(ref mut s) = *state.borrow_mut() {
		s.apply(event);
	}
}

/// Pan/zoom canvas showing the analyzer's AST as a tidy tree.
#[component]
pub fn AstTreeCanvas(
	/// Graph to lay out; a new value recomputes the layout.
	#[prop(into)]
	graph: Signal<AstGraph>,
	/// Canvas height in pixels. The width follows the parent element.
	#[prop(default = 500.0)]
	height: f64,
	/// Layout geometry.
	#[prop(optional)]
	layout_config: TreeLayoutConfig,
	/// Zoom limits and steps.
	#[prop(optional)]
	viewport_config: ViewportConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	// Recomputed only when the graph changes, never on viewport interaction.
	let layout = Memo::new(move |_| graph.with(|g| compute_layout(g, &layout_config).map(Arc::new)));

	let state: SharedState = Rc::new(RefCell::new(None));
	let callbacks = Callbacks::default();
	// Outlives the init effect so cleanup can still reach the registered closures.
	let registered = StoredValue::new_local(callbacks.clone());
	let (state_init, callbacks_init) = (state.clone(), callbacks);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let width = parent_width(&canvas).unwrap_or(800.0);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			warn!("2d canvas context unavailable, AST view disabled");
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			warn!("unexpected canvas context type, AST view disabled");
			return;
		};
		*state_init.borrow_mut() = Some(AstViewState::new(
			layout.get_untracked(),
			layout_config,
			viewport_config,
			width,
			height,
		));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*callbacks_init.resize.borrow_mut() = Some(Closure::new(move || {
			let Some(width) = parent_width(&canvas_resize) else {
				return;
			};
			canvas_resize.set_width(width as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(width, height);
			}
		}));
		if let (Some(cb), Some(window)) = (&*callbacks_init.resize.borrow(), web_sys::window()) {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, callbacks_anim) = (state_init.clone(), callbacks_init.clone());
		let mut last = js_sys::Date::now();
		*callbacks_init.animate.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, 0.1);
			last = now;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &ctx);
			}
			callbacks_anim.request_frame();
		}));
		callbacks_init.request_frame();
	});

	let state_sync = state.clone();
	Effect::new(move |_| {
		let next = layout.get();
		if let Some(ref mut s) = *state_sync.borrow_mut() {
			s.set_layout(next);
		}
	});

	on_cleanup(move || {
		registered.try_with_value(Callbacks::detach);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let primary = ev.button() == 0;
		dispatch(&state_md, ViewportEvent::PointerDown { x, y, primary });
		if primary {
			set_cursor(canvas_ref, true);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.viewport.is_dragging {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
			s.apply(ViewportEvent::PointerMove { x, y });
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		dispatch(&state_mu, ViewportEvent::PointerUp);
		set_cursor(canvas_ref, false);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		dispatch(&state_ml, ViewportEvent::PointerLeave);
		set_cursor(canvas_ref, false);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		dispatch(&state_wh, ViewportEvent::Wheel { delta_y: ev.delta_y() });
	};

	let (state_zi, state_zo, state_rs) = (state.clone(), state.clone(), state.clone());
	let zoom_in = move |_: MouseEvent| dispatch(&state_zi, ViewportEvent::ZoomIn);
	let zoom_out = move |_: MouseEvent| dispatch(&state_zo, ViewportEvent::ZoomOut);
	let reset_view = move |_: MouseEvent| dispatch(&state_rs, ViewportEvent::Reset);

	let diagnostics = move || {
		layout.with(|l| match l {
			Ok(l) if !l.diagnostics.is_clean() => Some(format!(
				"{} edge(s) dropped, {} node(s) unreachable",
				l.diagnostics.dropped_edges, l.diagnostics.unreachable_nodes
			)),
			_ => None,
		})
	};

	view! {
		<div class="ast-tree">
			<div class="ast-tree-toolbar">
				<button title="Zoom in" on:click=zoom_in>"+"</button>
				<button title="Zoom out" on:click=zoom_out>"−"</button>
				<button title="Reset view" on:click=reset_view>"Reset"</button>
			</div>
			<canvas
				node_ref=canvas_ref
				class="ast-tree-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; width: 100%; cursor: grab;"
			/>
			{move || diagnostics().map(|text| view! { <p class="ast-tree-diagnostics">{text}</p> })}
		</div>
	}
}
