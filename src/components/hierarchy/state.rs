use std::sync::Arc;

use log::debug;

use super::drag::{DragState, PointerInput};
use super::edges::{EdgeRoute, EdgeStyle, route_edges};
use super::layout::{LayoutConfig, allocate};
use super::preview::{display_label, summary};
use super::types::{CollapsedSet, NodeId, NodeKind, NodeTable, Point, PositionMap};
use super::visibility::visible_nodes;

/// Margin kept around the outermost card when sizing the canvas.
const CANVAS_MARGIN: f64 = 40.0;
const MIN_CANVAS: (f64, f64) = (640.0, 480.0);

/// What a card shows.
#[derive(Clone, Debug, PartialEq)]
pub struct CardModel {
	pub id: NodeId,
	pub label: String,
	pub kind: NodeKind,
	pub lines: Vec<String>,
	pub summary: String,
	pub children: usize,
}

/// Everything the canvas renders for one document.
///
/// Interactions never mutate a state; they produce the next one, so a render
/// pass always reads a consistent snapshot.
#[derive(Clone, Debug)]
pub struct DiagramState {
	revision: u64,
	table: Arc<NodeTable>,
	positions: PositionMap,
	collapsed: CollapsedSet,
	drag: DragState,
	config: LayoutConfig,
}

impl DiagramState {
	/// Fresh state for a newly built table: default layout, nothing
	/// collapsed, no drag.
	pub fn new(revision: u64, table: Arc<NodeTable>, config: LayoutConfig) -> Self {
		let positions = allocate(&table, &config);
		Self {
			revision,
			table,
			positions,
			collapsed: CollapsedSet::default(),
			drag: DragState::Idle,
			config,
		}
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn drag(&self) -> DragState {
		self.drag
	}

	/// Next state after a pointer input, or `None` when nothing changed.
	pub fn on_pointer(&self, input: PointerInput) -> Option<Self> {
		let step = self.drag.step(input, &self.positions);
		if step.state == self.drag && step.positions.is_none() {
			return None;
		}
		Some(Self {
			positions: step.positions.unwrap_or_else(|| self.positions.clone()),
			drag: step.state,
			..self.clone()
		})
	}

	/// Next state with `id` collapsed or expanded. Unknown ids are ignored.
	pub fn with_collapse_toggled(&self, id: NodeId) -> Self {
		if self.table.get(id).is_none() {
			debug!("Ignoring collapse toggle for unknown node {id}");
			return self.clone();
		}
		let collapsed = self.collapsed.toggled(id);
		debug!(
			"{} {id}",
			if collapsed.contains(id) { "Collapsed" } else { "Expanded" }
		);
		Self {
			collapsed,
			..self.clone()
		}
	}

	pub fn is_collapsed(&self, id: NodeId) -> bool {
		self.collapsed.contains(id)
	}

	pub fn position(&self, id: NodeId) -> Option<Point> {
		self.positions.get(id)
	}

	pub fn visible_ids(&self) -> Vec<NodeId> {
		visible_nodes(&self.table, &self.collapsed).map(|node| node.id).collect()
	}

	pub fn card(&self, id: NodeId) -> Option<CardModel> {
		let node = self.table.get(id)?;
		Some(CardModel {
			id,
			label: display_label(node),
			kind: node.kind,
			lines: node.preview.clone(),
			summary: summary(&node.preview, self.config.preview_length),
			children: node.children.len(),
		})
	}

	pub fn edges(&self, style: EdgeStyle) -> Vec<EdgeRoute> {
		route_edges(&self.table, &self.collapsed, &self.positions, style, &self.config)
	}

	/// Width and height needed to show every visible card.
	pub fn extent(&self) -> (f64, f64) {
		self.visible_ids()
			.into_iter()
			.filter_map(|id| self.positions.get(id))
			.fold(MIN_CANVAS, |(w, h), at| {
				(
					w.max(at.x + self.config.card_width + CANVAS_MARGIN),
					h.max(at.y + self.config.card_height + CANVAS_MARGIN),
				)
			})
	}
}
