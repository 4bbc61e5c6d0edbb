//! Connector geometry between a parent card and its children.
//!
//! Routes are recomputed from the live position map on every render and hold
//! no state of their own.

use log::warn;

use super::layout::LayoutConfig;
use super::types::{CollapsedSet, NodeId, NodeTable, Point, PositionMap};
use super::visibility::visible_edges;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStyle {
	/// Horizontal, vertical, horizontal through the midpoint between the
	/// two ports. Reads better when many siblings share a lane.
	#[default]
	Orthogonal,
	/// Cubic curve with horizontal tangents at both ports.
	Curved,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgePath {
	Orthogonal {
		start: Point,
		mid_x: f64,
		end: Point,
	},
	Curved {
		start: Point,
		control_start: Point,
		control_end: Point,
		end: Point,
	},
}

impl EdgePath {
	/// SVG path data.
	pub fn svg(&self) -> String {
		match self {
			EdgePath::Orthogonal { start, mid_x, end } => format!(
				"M {} {} L {} {} L {} {} L {} {}",
				start.x, start.y, mid_x, start.y, mid_x, end.y, end.x, end.y
			),
			EdgePath::Curved {
				start,
				control_start,
				control_end,
				end,
			} => format!(
				"M {} {} C {} {} {} {} {} {}",
				start.x,
				start.y,
				control_start.x,
				control_start.y,
				control_end.x,
				control_end.y,
				end.x,
				end.y
			),
		}
	}

	/// Point halfway along the path.
	pub fn midpoint(&self) -> Point {
		match self {
			EdgePath::Orthogonal { start, mid_x, end } => Point::new(*mid_x, (start.y + end.y) / 2.0),
			// cubic bezier at t = 0.5
			EdgePath::Curved {
				start,
				control_start,
				control_end,
				end,
			} => Point::new(
				(start.x + 3.0 * control_start.x + 3.0 * control_end.x + end.x) / 8.0,
				(start.y + 3.0 * control_start.y + 3.0 * control_end.y + end.y) / 8.0,
			),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLabel {
	pub text: String,
	pub at: Point,
}

/// One rendered connector.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRoute {
	pub from: NodeId,
	pub to: NodeId,
	pub path: EdgePath,
	pub label: Option<EdgeLabel>,
}

/// Path from the parent card at `from` to the child card at `to`, plus the
/// label placement when the child has an edge label.
pub fn route(
	from: Point,
	to: Point,
	edge_label: Option<&str>,
	style: EdgeStyle,
	config: &LayoutConfig,
) -> (EdgePath, Option<EdgeLabel>) {
	let start = Point::new(
		from.x + config.card_width + config.port_gap,
		from.y + config.card_height / 2.0 + config.header_offset,
	);
	let end = Point::new(to.x, to.y + config.card_height / 2.0);

	let path = match style {
		EdgeStyle::Orthogonal => EdgePath::Orthogonal {
			start,
			mid_x: (start.x + end.x) / 2.0,
			end,
		},
		EdgeStyle::Curved => EdgePath::Curved {
			start,
			control_start: Point::new(start.x + config.curve_tension, start.y),
			control_end: Point::new(end.x - config.curve_tension, end.y),
			end,
		},
	};

	let label = edge_label.map(|text| {
		let mid = path.midpoint();
		EdgeLabel {
			text: text.to_owned(),
			at: Point::new(mid.x, mid.y - config.label_lift),
		}
	});
	(path, label)
}

/// Routes for every visible edge. Edges whose endpoints have no position are
/// left out.
pub fn route_edges(
	table: &NodeTable,
	collapsed: &CollapsedSet,
	positions: &PositionMap,
	style: EdgeStyle,
	config: &LayoutConfig,
) -> Vec<EdgeRoute> {
	visible_edges(table, collapsed)
		.filter_map(|(parent, child)| {
			let (Some(from), Some(to)) = (positions.get(parent.id), positions.get(child.id)) else {
				warn!("Skipping edge {} -> {}: missing position", parent.id, child.id);
				return None;
			};
			let (path, label) = route(from, to, child.edge_label.as_deref(), style, config);
			Some(EdgeRoute {
				from: parent.id,
				to: child.id,
				path,
				label,
			})
		})
		.collect()
}
