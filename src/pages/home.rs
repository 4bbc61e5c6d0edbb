use leptos::prelude::*;

use crate::components::document_input::DocumentInput;
use crate::components::hierarchy::{EdgeStyle, HierarchyCanvas, LayoutConfig};
use crate::document::{DocumentMode, DocumentSession};

/// Document shown before the user loads one of their own.
const SAMPLE_DOCUMENT: &str = r#"{
  "name": "hierarchy-canvas",
  "version": 1,
  "private": true,
  "owner": { "team": "tools", "contact": null },
  "services": [
    { "id": "api", "port": 8080, "tags": ["http", "public"] },
    { "id": "worker", "replicas": 3, "queue": { "name": "jobs", "durable": true } }
  ]
}"#;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let session = RwSignal::new(DocumentSession::new(SAMPLE_DOCUMENT, DocumentMode::Json));
	let document = Memo::new(move |_| session.with(|s| s.document()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<section class="workspace" style="display: flex; height: 100vh; gap: 1rem;">
				<DocumentInput session=session />
				<div class="diagram" style="flex: 1; min-width: 0;">
					<HierarchyCanvas
						document=document
						config=LayoutConfig::default()
						edge_style=EdgeStyle::Orthogonal
					/>
				</div>
			</section>
			<div class="graph-overlay">
				<p class="subtitle">"Drag cards to reposition. Click a key to collapse or expand."</p>
			</div>
		</ErrorBoundary>
	}
}
