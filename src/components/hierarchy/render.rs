use leptos::prelude::*;
use web_sys::{MouseEvent, PointerEvent};

use super::edges::{EdgeRoute, EdgeStyle};
use super::state::{CardModel, DiagramState};
use super::types::Point;

const ARROW_ID: &str = "hierarchy-arrow";

/// SVG layer with every visible connector, sized to the current extent.
pub fn edge_layer(state: &DiagramState, style: EdgeStyle) -> impl IntoView + use<> {
	let (width, height) = state.extent();
	let routes = state.edges(style);

	view! {
		<svg
			class="hierarchy-edges"
			width=width.to_string()
			height=height.to_string()
			style="position: absolute; left: 0; top: 0; pointer-events: none;"
		>
			<defs>
				<marker
					id=ARROW_ID
					viewBox="0 0 10 10"
					refX="8"
					refY="5"
					markerWidth="6"
					markerHeight="6"
					orient="auto-start-reverse"
				>
					<path d="M 0 0 L 10 5 L 0 10 z" fill="currentColor" />
				</marker>
			</defs>
			{routes.into_iter().map(edge).collect_view()}
		</svg>
	}
}

fn edge(route: EdgeRoute) -> impl IntoView {
	let label = route.label.map(|label| {
		view! {
			<text
				class="hierarchy-edge-label"
				x=label.at.x.to_string()
				y=label.at.y.to_string()
				font-size="12"
				fill="currentColor"
			>
				{label.text}
			</text>
		}
	});

	view! {
		<g>
			<path
				d=route.path.svg()
				stroke="currentColor"
				stroke-width="2"
				fill="none"
				marker-end=format!("url(#{ARROW_ID})")
			/>
			{label}
		</g>
	}
}

/// One draggable card. Presses on the label toggle collapse and never reach
/// the card body, so they cannot start a drag.
pub fn card(
	card: CardModel,
	width: f64,
	position: Signal<Point>,
	collapsed: Signal<bool>,
	on_press: impl FnMut(PointerEvent) + 'static,
	on_toggle: impl FnMut(MouseEvent) + 'static,
) -> impl IntoView {
	let CardModel {
		label,
		kind,
		lines,
		summary,
		children,
		..
	} = card;

	view! {
		<div
			class="hierarchy-card"
			class:collapsed=move || collapsed.get()
			title=summary
			style=move || {
				let at = position.get();
				format!(
					"position: absolute; left: {}px; top: {}px; width: {width}px; cursor: grab; user-select: none; touch-action: none;",
					at.x, at.y
				)
			}
			on:pointerdown=on_press
		>
			<div class="hierarchy-card-header">
				<button
					class="hierarchy-card-label"
					title="Collapse / expand children"
					on:pointerdown=|ev: PointerEvent| ev.stop_propagation()
					on:click=on_toggle
				>
					{label}
				</button>
				<span class="hierarchy-card-kind">{kind.name()}</span>
				<span class="hierarchy-card-children">
					{move || if collapsed.get() { format!("+{children}") } else { children.to_string() }}
				</span>
			</div>
			<ul class="hierarchy-card-lines">
				{lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
			</ul>
		</div>
	}
}
