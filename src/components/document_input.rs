//! Text editor, file picker and mode selector feeding a [`DocumentSession`].

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::document::{DocumentMode, DocumentSession};

#[component]
pub fn DocumentInput(session: RwSignal<DocumentSession>) -> impl IntoView {
	let mode = move || session.with(|s| s.mode());

	let on_edit = move |ev: leptos::ev::Event| {
		let text = event_target_value(&ev);
		session.update(|s| {
			let mode = s.mode();
			let _ = s.load(text, mode);
		});
	};

	let on_mode = move |ev: leptos::ev::Event| {
		let Some(mode) = DocumentMode::from_name(&event_target_value(&ev)) else {
			return;
		};
		session.update(|s| {
			let _ = s.set_mode(mode);
		});
	};

	let on_file = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			read_file(file, session);
		}
	};

	view! {
		<aside class="document-input">
			<form on:submit=|ev| ev.prevent_default()>
				<input type="file" class="file-input" accept=".json,.xml" on:change=on_file />
				<select class="mode-select" on:change=on_mode>
					{DocumentMode::ALL
						.into_iter()
						.map(|m| {
							view! {
								<option value=m.name() prop:selected=move || mode() == m>
									{m.name().to_uppercase()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</form>
			<textarea
				class="document-text"
				spellcheck="false"
				prop:value=move || session.with(|s| s.text().to_owned())
				on:input=on_edit
			/>
			{move || {
				session
					.with(|s| s.error().map(str::to_owned))
					.map(|message| view! { <p class="alert alert-danger" role="alert">{message}</p> })
			}}
		</aside>
	}
}

/// Reads `file` as text and loads it, picking the mode from its extension.
fn read_file(file: File, session: RwSignal<DocumentSession>) {
	let mode = DocumentMode::from_file_name(&file.name());
	let Ok(reader) = FileReader::new() else {
		error!("FileReader is not available");
		return;
	};

	let loaded = reader.clone();
	let onload = Closure::once_into_js(move || {
		match loaded.result().ok().and_then(|result| result.as_string()) {
			Some(text) => session.update(|s| {
				let _ = s.load(text, mode);
			}),
			None => warn!("File read produced no text"),
		}
	});
	let onerror = Closure::once_into_js(move || {
		session.update(|s| s.report_read_error("Error reading file"));
	});
	reader.set_onload(Some(onload.unchecked_ref::<js_sys::Function>()));
	reader.set_onerror(Some(onerror.unchecked_ref::<js_sys::Function>()));

	if let Err(err) = reader.read_as_text(&file) {
		error!("Error reading file: {err:?}");
		session.update(|s| s.report_read_error("Error reading file"));
	}
}
