use leptos::prelude::*;

use super::types::{AnalysisResult, ParseTable, TableGrid};
use crate::components::ast_tree::AstTreeCanvas;

fn symbol_badges(symbols: &[String], class: &'static str) -> impl IntoView + use<> {
	symbols
		.iter()
		.map(|symbol| view! { <span class=class>{symbol.clone()}</span> })
		.collect_view()
}

#[component]
pub fn GrammarSection(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	view! {
		<section class="grammar-section">
			<h3>"Productions"</h3>
			<div class="productions">
				{move || {
					result
						.with(|r| {
							r.grammar
								.iter()
								.map(|production| view! { <div class="production">{production.clone()}</div> })
								.collect_view()
						})
				}}
			</div>
			<div class="symbol-columns">
				<div>
					<h4>"Terminals"</h4>
					{move || result.with(|r| symbol_badges(&r.terminals, "badge terminal"))}
				</div>
				<div>
					<h4>"Non-terminals"</h4>
					{move || result.with(|r| symbol_badges(&r.non_terminals, "badge non-terminal"))}
				</div>
			</div>
		</section>
	}
}

#[component]
pub fn StatesSection(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	let (query, set_query) = signal(String::new());
	let filtered = move || {
		let query = query.get();
		result.with(|r| {
			r.states_matching(&query)
				.into_iter()
				.map(|(name, items)| (name.to_owned(), items.to_vec()))
				.collect::<Vec<_>>()
		})
	};

	view! {
		<section class="states-section">
			<input
				type="search"
				placeholder="Search state (e.g. I0, I1)..."
				prop:value=move || query.get()
				on:input=move |ev| set_query.set(event_target_value(&ev))
			/>
			{move || {
				let states = filtered();
				if states.is_empty() {
					return view! { <p class="empty">"No states found"</p> }.into_any();
				}
				states
					.into_iter()
					.map(|(name, items)| {
						view! {
							<div class="state-card">
								<h4>{name}</h4>
								{items
									.into_iter()
									.map(|item| view! { <div class="item">{item}</div> })
									.collect_view()}
							</div>
						}
					})
					.collect_view()
					.into_any()
			}}
		</section>
	}
}

fn table_view(table: &ParseTable) -> impl IntoView + use<> {
	let TableGrid { columns, rows } = TableGrid::from_table(table);
	view! {
		<table class="parse-table">
			<thead>
				<tr>
					<th>"State"</th>
					{columns.into_iter().map(|symbol| view! { <th>{symbol}</th> }).collect_view()}
				</tr>
			</thead>
			<tbody>
				{rows
					.into_iter()
					.map(|(state, cells)| {
						view! {
							<tr>
								<td class="state">{state}</td>
								{cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
							</tr>
						}
					})
					.collect_view()}
			</tbody>
		</table>
	}
}

#[component]
pub fn TablesSection(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	let (show_goto, set_show_goto) = signal(false);
	let tab_class = move |goto: bool| if show_goto.get() == goto { "tab active" } else { "tab" };

	view! {
		<section class="tables-section">
			<nav class="tabs">
				<button class=move || tab_class(false) on:click=move |_| set_show_goto.set(false)>
					"Action table"
				</button>
				<button class=move || tab_class(true) on:click=move |_| set_show_goto.set(true)>
					"Goto table"
				</button>
			</nav>
			{move || {
				result
					.with(|r| {
						if show_goto.get() { table_view(&r.goto_table) } else { table_view(&r.action_table) }
					})
			}}
		</section>
	}
}

#[component]
pub fn TraceSection(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	view! {
		<section class="trace-section">
			{move || {
				result
					.with(|r| {
						if r.trace.is_empty() {
							return view! { <p class="empty">"No trace available"</p> }.into_any();
						}
						r.trace
							.iter()
							.map(|step| {
								view! {
									<div class="trace-step">
										<div>
											<span class="caption">"Stack"</span>
											<code>{step.stack.to_string()}</code>
										</div>
										<div>
											<span class="caption">"Input"</span>
											<code>{step.input.to_string()}</code>
										</div>
										<div>
											<span class="caption">"Action"</span>
											<span class="badge action">{step.action.to_string()}</span>
										</div>
									</div>
								}
							})
							.collect_view()
							.into_any()
					})
			}}
		</section>
	}
}

#[component]
pub fn AstSection(#[prop(into)] result: Signal<AnalysisResult>) -> impl IntoView {
	let graph = Signal::derive(move || result.with(|r| r.ast_graph_or_demo()));
	let text = move || result.with(|r| r.ast_text().to_owned());

	view! {
		<section class="ast-section">
			<h3>"Abstract Syntax Tree"</h3>
			<AstTreeCanvas graph=graph />
			<h4>"Text representation"</h4>
			<pre class="ast-text">{text}</pre>
		</section>
	}
}
