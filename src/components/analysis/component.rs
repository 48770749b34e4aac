use leptos::prelude::*;

use super::sections::{AstSection, GrammarSection, StatesSection, TablesSection, TraceSection};
use super::types::AnalysisResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Grammar,
	States,
	Tables,
	Trace,
	Ast,
}

const TABS: [(Tab, &str); 5] = [
	(Tab::Grammar, "Grammar"),
	(Tab::States, "States"),
	(Tab::Tables, "Tables"),
	(Tab::Trace, "Trace"),
	(Tab::Ast, "AST"),
];

/// Tabbed view over one analyzer response.
#[component]
pub fn AnalysisResults(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	let (tab, set_tab) = signal(Tab::Grammar);

	view! {
		<div class="analysis-results">
			<nav class="tabs">
				{TABS
					.into_iter()
					.map(|(t, label)| {
						view! {
							<button
								class=move || if tab.get() == t { "tab active" } else { "tab" }
								on:click=move |_| set_tab.set(t)
							>
								{label}
							</button>
						}
					})
					.collect_view()}
			</nav>
			{move || match tab.get() {
				Tab::Grammar => view! { <GrammarSection result=result /> }.into_any(),
				Tab::States => view! { <StatesSection result=result /> }.into_any(),
				Tab::Tables => view! { <TablesSection result=result /> }.into_any(),
				Tab::Trace => view! { <TraceSection result=result /> }.into_any(),
				Tab::Ast => view! { <AstSection result=result /> }.into_any(),
			}}
		</div>
	}
}
