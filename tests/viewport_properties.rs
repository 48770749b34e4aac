//! Property tests for the viewport state machine.
//!
//! 1. Zoom never leaves [0.5, 3.0], whatever the gesture sequence.
//! 2. Repeated zoom-in/zoom-out land exactly on the bounds.
//! 3. Reset always yields zoom 1 and pan (0, 0).

#![allow(unused_crate_dependencies)]

use lr1_ast_viewer::ast_tree::config::ViewportConfig;
use lr1_ast_viewer::ast_tree::viewport::{ViewportEvent, ViewportState};
use proptest::prelude::*;

fn event_strategy() -> impl Strategy<Value = ViewportEvent> {
	let coord = -2000.0f64..2000.0;
	prop_oneof![
		(coord.clone(), coord.clone(), any::<bool>())
			.prop_map(|(x, y, primary)| ViewportEvent::PointerDown { x, y, primary }),
		(coord.clone(), coord).prop_map(|(x, y)| ViewportEvent::PointerMove { x, y }),
		Just(ViewportEvent::PointerUp),
		Just(ViewportEvent::PointerLeave),
		(-500.0f64..500.0).prop_map(|delta_y| ViewportEvent::Wheel { delta_y }),
		Just(ViewportEvent::ZoomIn),
		Just(ViewportEvent::ZoomOut),
	]
}

proptest! {
	#[test]
	fn zoom_stays_clamped(events in prop::collection::vec(event_strategy(), 0..200)) {
		let cfg = ViewportConfig::default();
		let mut state = ViewportState::default();
		for event in events {
			state = state.apply(event, &cfg);
			prop_assert!((0.5..=3.0).contains(&state.zoom), "zoom {} after {:?}", state.zoom, event);
		}
	}

	#[test]
	fn reset_is_absolute(events in prop::collection::vec(event_strategy(), 0..200)) {
		let cfg = ViewportConfig::default();
		let state = events.into_iter().fold(ViewportState::default(), |s, e| s.apply(e, &cfg));
		let reset = state.reset_view(&cfg);
		prop_assert_eq!(reset.zoom, 1.0);
		prop_assert_eq!(reset.pan, (0.0, 0.0));
		prop_assert_eq!(reset.reset_view(&cfg), reset);
	}

	#[test]
	fn drag_pan_depends_only_on_anchor(
		start in (-500.0f64..500.0, -500.0f64..500.0),
		path in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..50),
	) {
		let cfg = ViewportConfig::default();
		let mut state = ViewportState::default()
			.apply(ViewportEvent::PointerDown { x: start.0, y: start.1, primary: true }, &cfg);
		for &(x, y) in &path {
			state = state.apply(ViewportEvent::PointerMove { x, y }, &cfg);
		}
		let last = path[path.len() - 1];
		prop_assert!((state.pan.0 - (last.0 - start.0)).abs() < 1e-9);
		prop_assert!((state.pan.1 - (last.1 - start.1)).abs() < 1e-9);
	}
}

#[test]
fn zoom_in_and_out_hit_the_bounds_exactly() {
	let cfg = ViewportConfig::default();
	let max = (0..40).fold(ViewportState::default(), |s, _| s.zoom_in(&cfg));
	assert_eq!(max.zoom, 3.0);
	let min = (0..40).fold(ViewportState::default(), |s, _| s.zoom_out(&cfg));
	assert_eq!(min.zoom, 0.5);
}
