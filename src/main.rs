#![allow(unused_crate_dependencies)]

use lr1_ast_viewer::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
