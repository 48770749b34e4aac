use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::warn;

use crate::components::analysis::{AnalysisResult, AnalysisResults};

/// Response for `S -> C C`, `C -> c C`, `C -> d` on `c d d`, preloaded so the
/// page is useful before anything is pasted.
const SAMPLE_RESPONSE: &str = include_str!("sample_response.json");

fn decode(body: &str) -> Result<AnalysisResult, String> {
	AnalysisResult::from_json(body).map_err(|err| {
		warn!("analyzer response rejected: {err}");
		err.to_string()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (source, set_source) = signal(SAMPLE_RESPONSE.to_owned());
	let (decoded, set_decoded) = signal(decode(SAMPLE_RESPONSE));

	// Stays mounted across responses so the AST viewport survives a re-render.
	let result = Signal::derive(move || decoded.with(|d| d.as_ref().ok().cloned().unwrap_or_default()));
	let error = move || decoded.with(|d| d.as_ref().err().cloned());

	let on_render = move |_: MouseEvent| set_decoded.set(decode(&source.get_untracked()));

	view! {
		<main class="analyzer-page">
			<header>
				<span class="badge">"LR(1) Parser"</span>
				<h1>"Parser Analyzer"</h1>
				<p class="subtitle">
					"Inspect grammars, automaton states, parse tables and syntax trees."
				</p>
			</header>

			<section class="response-input">
				<label for="analyzer-response">"Analyzer response (JSON)"</label>
				<textarea
					id="analyzer-response"
					spellcheck="false"
					prop:value=move || source.get()
					on:input=move |ev| set_source.set(event_target_value(&ev))
				></textarea>
				<button on:click=on_render>"Render"</button>
			</section>

			{move || error().map(|err| view! { <div class="error-banner">"Error: " {err}</div> })}

			<Show when=move || decoded.with(Result::is_ok)>
				<AnalysisResults result=result />
			</Show>
		</main>
	}
}
