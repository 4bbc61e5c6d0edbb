use super::types::{NodeTable, Point, PositionMap};

/// Card and lane geometry shared by layout, edge routing and rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Horizontal distance between depth lanes.
	pub lane_width: f64,
	pub card_width: f64,
	pub card_height: f64,
	/// Margin from the canvas origin.
	pub base_offset: f64,
	/// Extra x shift per card already placed in the same lane.
	pub lane_jitter: f64,
	pub vertical_gap: f64,
	/// Height of the card header; outgoing edges leave below it.
	pub header_offset: f64,
	/// Gap between a card's right edge and the start of its edges.
	pub port_gap: f64,
	/// Horizontal control point distance for curved edges.
	pub curve_tension: f64,
	/// How far an edge label floats above its connector.
	pub label_lift: f64,
	/// Maximum characters of a card's one-line summary.
	pub preview_length: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			lane_width: 260.0,
			card_width: 224.0,
			card_height: 70.0,
			base_offset: 20.0,
			lane_jitter: 50.0,
			vertical_gap: 100.0,
			header_offset: 38.0,
			port_gap: 6.0,
			curve_tension: 140.0,
			label_lift: 8.0,
			preview_length: 80,
		}
	}
}

/// Initial position of every node, from its depth and its order among the
/// nodes already placed at that depth.
pub fn allocate(table: &NodeTable, config: &LayoutConfig) -> PositionMap {
	let mut placed_per_depth: Vec<usize> = Vec::new();
	table
		.iter()
		.map(|node| {
			if placed_per_depth.len() <= node.depth {
				placed_per_depth.resize(node.depth + 1, 0);
			}
			let n = placed_per_depth[node.depth] as f64;
			placed_per_depth[node.depth] += 1;

			let x = node.depth as f64 * config.lane_width + config.base_offset + n * config.lane_jitter;
			let y = n * (config.card_height + config.vertical_gap) + config.base_offset;
			(node.id, Point::new(x, y))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hierarchy::build;
	use crate::components::hierarchy::testing::{arb_value, json};
	use crate::components::hierarchy::types::NodeId;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	#[test]
	fn stacks_nodes_per_lane() {
		let table = build(&json(r#"{"a": {"x": {}}, "b": {}, "c": [{}, {}]}"#), "root");
		// pre-order: root, a, x, b, [0], [1]
		let positions = allocate(&table, &LayoutConfig::default());

		let at = |i| positions.get(NodeId(i)).unwrap();
		assert_eq!(at(0), Point::new(20.0, 20.0));
		assert_eq!(at(1), Point::new(280.0, 20.0));
		assert_eq!(at(2), Point::new(540.0, 20.0));
		assert_eq!(at(3), Point::new(330.0, 190.0));
		assert_eq!(at(4), Point::new(380.0, 360.0));
		assert_eq!(at(5), Point::new(430.0, 530.0));
	}

	#[test]
	fn honours_custom_geometry() {
		let table = build(&json(r#"{"a": {}, "b": {}}"#), "root");
		let config = LayoutConfig {
			lane_width: 100.0,
			card_height: 10.0,
			base_offset: 0.0,
			lane_jitter: 0.0,
			vertical_gap: 5.0,
			..LayoutConfig::default()
		};
		let positions = allocate(&table, &config);
		assert_eq!(positions.get(NodeId(2)), Some(Point::new(100.0, 15.0)));
	}

	proptest! {
		#[test]
		fn every_node_gets_a_fixed_position(value in arb_value()) {
			let table = build(&value, "root");
			let config = LayoutConfig::default();
			let positions = allocate(&table, &config);
			prop_assert_eq!(positions.len(), table.len());
			prop_assert_eq!(&positions, &allocate(&table, &config));
			for node in table.iter() {
				let at = positions.get(node.id).unwrap();
				prop_assert!(at.x >= node.depth as f64 * config.lane_width);
				prop_assert!(at.y >= config.base_offset);
			}
		}
	}
}
