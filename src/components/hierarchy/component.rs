use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, MouseEvent, PointerEvent, TouchEvent, Window};

use super::drag::PointerInput;
use super::edges::EdgeStyle;
use super::layout::LayoutConfig;
use super::render;
use super::state::DiagramState;
use super::types::{NodeId, Point};
use crate::document::LoadedDocument;

const MOVE_EVENTS: [&str; 2] = ["pointermove", "touchmove"];
const RELEASE_EVENTS: [&str; 2] = ["pointerup", "touchend"];

type DiagramSignal = RwSignal<Option<DiagramState>>;

#[component]
pub fn HierarchyCanvas(
	#[prop(into)] document: Signal<Option<LoadedDocument>>,
	#[prop(optional)] config: LayoutConfig,
	#[prop(default = EdgeStyle::Orthogonal)] edge_style: EdgeStyle,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let state: DiagramSignal = RwSignal::new(None);

	// A new document replaces positions, collapse state and any drag.
	Effect::new(move |_| {
		let next = document.get();
		let current = state.with_untracked(|s| s.as_ref().map(DiagramState::revision));
		if next.as_ref().map(|doc| doc.revision) == current {
			return;
		}
		state.set(next.map(|doc| DiagramState::new(doc.revision, doc.table, config)));
	});

	// Moves and releases are tracked on the window so a drag survives the
	// pointer leaving its card. Dropped together with this component.
	let _subscription = StoredValue::new_local(web_sys::window().map(|window| {
		PointerSubscription::attach(
			window,
			move |event: Event| {
				let dragging = state.with_untracked(|s| s.as_ref().and_then(|s| s.drag().dragging()));
				if dragging.is_none() {
					return;
				}
				let Some(at) = client_position(&event).and_then(|c| canvas_point(container_ref, c))
				else {
					return;
				};
				event.prevent_default();
				apply_pointer(state, PointerInput::Move { at });
			},
			move |_: Event| apply_pointer(state, PointerInput::Up),
		)
	}));

	let card_for = move |(_, id): (u64, NodeId)| {
		let card = state.with_untracked(|s| s.as_ref().and_then(|s| s.card(id)))?;
		let position = Signal::derive(move || {
			state
				.with(|s| s.as_ref().and_then(|s| s.position(id)))
				.unwrap_or_default()
		});
		let collapsed = Signal::derive(move || state.with(|s| s.as_ref().is_some_and(|s| s.is_collapsed(id))));
		let on_press = move |ev: PointerEvent| {
			ev.prevent_default();
			let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
			if let Some(at) = canvas_point(container_ref, client) {
				apply_pointer(state, PointerInput::Down { node: id, at });
			}
		};
		let on_toggle = move |_: MouseEvent| {
			let next = state.with_untracked(|s| s.as_ref().map(|s| s.with_collapse_toggled(id)));
			if next.is_some() {
				state.set(next);
			}
		};
		Some(render::card(card, config.card_width, position, collapsed, on_press, on_toggle))
	};

	view! {
		<div
			node_ref=container_ref
			class="hierarchy-canvas"
			style="position: relative; overflow: auto; width: 100%; height: 100%;"
		>
			{move || state.with(|s| s.as_ref().map(|s| render::edge_layer(s, edge_style)))}
			<For
				each=move || {
					state
						.with(|s| {
							s.as_ref().map(|s| {
								let revision = s.revision();
								s.visible_ids().into_iter().map(|id| (revision, id)).collect::<Vec<_>>()
							})
						})
						.unwrap_or_default()
				}
				key=|key| *key
				children=card_for
			/>
		</div>
	}
}

/// Feeds `input` to the current state and stores the result if it changed.
fn apply_pointer(state: DiagramSignal, input: PointerInput) {
	let next = state.with_untracked(|s| s.as_ref().and_then(|s| s.on_pointer(input)));
	if next.is_some() {
		state.set(next);
	}
}

/// Converts client coordinates to coordinates inside the scrolled canvas.
fn canvas_point(container_ref: NodeRef<leptos::html::Div>, client: Point) -> Option<Point> {
	let container = container_ref.get_untracked()?;
	let rect = container.get_bounding_client_rect();
	Some(Point::new(
		client.x - rect.left() + container.scroll_left() as f64,
		client.y - rect.top() + container.scroll_top() as f64,
	))
}

fn client_position(event: &Event) -> Option<Point> {
	if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
		return Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64));
	}
	let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
	Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

/// Window listeners for one canvas; removed on drop.
struct PointerSubscription {
	window: Window,
	on_move: Closure<dyn FnMut(Event)>,
	on_release: Closure<dyn FnMut(Event)>,
}

impl PointerSubscription {
	fn attach(
		window: Window,
		on_move: impl FnMut(Event) + 'static,
		on_release: impl FnMut(Event) + 'static,
	) -> Self {
		let on_move = Closure::<dyn FnMut(Event)>::new(on_move);
		let on_release = Closure::<dyn FnMut(Event)>::new(on_release);

		// not passive, so a touch drag can stop the page from scrolling
		let options = AddEventListenerOptions::new();
		options.set_passive(false);
		for name in MOVE_EVENTS {
			let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
				name,
				on_move.as_ref().unchecked_ref(),
				&options,
			);
		}
		for name in RELEASE_EVENTS {
			let _ = window.add_event_listener_with_callback(name, on_release.as_ref().unchecked_ref());
		}

		Self {
			window,
			on_move,
			on_release,
		}
	}
}

impl Drop for PointerSubscription {
	fn drop(&mut self) {
		for name in MOVE_EVENTS {
			let _ = self
				.window
				.remove_event_listener_with_callback(name, self.on_move.as_ref().unchecked_ref());
		}
		for name in RELEASE_EVENTS {
			let _ = self
				.window
				.remove_event_listener_with_callback(name, self.on_release.as_ref().unchecked_ref());
		}
	}
}
