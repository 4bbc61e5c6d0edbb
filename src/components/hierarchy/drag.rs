use log::debug;

use super::types::{NodeId, Point, PositionMap};

/// Pointer state of the canvas. At most one card is dragged at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging {
		node: NodeId,
		/// Pointer position minus card position at press time.
		grab_offset: Point,
	},
}

/// Pointer input in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	/// Press on a card body.
	Down { node: NodeId, at: Point },
	Move { at: Point },
	/// Pointer release or touch end.
	Up,
}

/// Result of feeding one input to a [`DragState`]. `positions` is only set
/// when a card moved.
#[derive(Clone, Debug, PartialEq)]
pub struct DragStep {
	pub state: DragState,
	pub positions: Option<PositionMap>,
}

impl DragStep {
	fn unchanged(state: DragState) -> Self {
		Self {
			state,
			positions: None,
		}
	}
}

impl DragState {
	pub fn dragging(&self) -> Option<NodeId> {
		match self {
			DragState::Idle => None,
			DragState::Dragging { node, .. } => Some(*node),
		}
	}

	pub fn step(self, input: PointerInput, positions: &PositionMap) -> DragStep {
		match (self, input) {
			(DragState::Idle, PointerInput::Down { node, at }) => {
				let Some(origin) = positions.get(node) else {
					debug!("Ignoring press on {node}: no position");
					return DragStep::unchanged(self);
				};
				debug!("Drag start on {node}");
				DragStep::unchanged(DragState::Dragging {
					node,
					grab_offset: at.offset_from(origin),
				})
			}
			(DragState::Dragging { node, grab_offset }, PointerInput::Move { at }) => {
				if positions.get(node).is_none() {
					debug!("Dropping drag on {node}: node is gone");
					return DragStep::unchanged(DragState::Idle);
				}
				let target = at.offset_from(grab_offset).clamp_non_negative();
				DragStep {
					state: self,
					positions: Some(positions.with(node, target)),
				}
			}
			(DragState::Dragging { node, .. }, PointerInput::Up) => {
				debug!("Drag end on {node}");
				DragStep::unchanged(DragState::Idle)
			}
			// a second press while dragging, or moves and releases while idle
			_ => DragStep::unchanged(self),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn positions() -> PositionMap {
		[
			(NodeId(0), Point::new(20.0, 20.0)),
			(NodeId(1), Point::new(300.0, 40.0)),
		]
		.into_iter()
		.collect()
	}

	fn drive(inputs: &[PointerInput]) -> (DragState, PositionMap) {
		let mut state = DragState::Idle;
		let mut map = positions();
		for input in inputs {
			let step = state.step(*input, &map);
			state = step.state;
			if let Some(next) = step.positions {
				map = next;
			}
		}
		(state, map)
	}

	#[test]
	fn keeps_grab_offset_for_the_whole_drag() {
		let (state, map) = drive(&[
			PointerInput::Down {
				node: NodeId(1),
				at: Point::new(310.0, 45.0),
			},
			PointerInput::Move {
				at: Point::new(400.0, 100.0),
			},
			PointerInput::Move {
				at: Point::new(410.0, 145.0),
			},
		]);
		assert_eq!(
			state,
			DragState::Dragging {
				node: NodeId(1),
				grab_offset: Point::new(10.0, 5.0)
			}
		);
		assert_eq!(map.get(NodeId(1)), Some(Point::new(400.0, 140.0)));
		assert_eq!(map.get(NodeId(0)), Some(Point::new(20.0, 20.0)));
	}

	#[test]
	fn press_without_movement_does_not_move() {
		let (state, map) = drive(&[
			PointerInput::Down {
				node: NodeId(0),
				at: Point::new(25.0, 25.0),
			},
			PointerInput::Up,
		]);
		assert_eq!(state, DragState::Idle);
		assert_eq!(map, positions());
	}

	#[test]
	fn second_press_does_not_steal_the_drag() {
		let (state, map) = drive(&[
			PointerInput::Down {
				node: NodeId(0),
				at: Point::new(20.0, 20.0),
			},
			PointerInput::Down {
				node: NodeId(1),
				at: Point::new(300.0, 40.0),
			},
			PointerInput::Move {
				at: Point::new(50.0, 60.0),
			},
		]);
		assert_eq!(state.dragging(), Some(NodeId(0)));
		assert_eq!(map.get(NodeId(0)), Some(Point::new(50.0, 60.0)));
		assert_eq!(map.get(NodeId(1)), Some(Point::new(300.0, 40.0)));
	}

	#[test]
	fn moves_while_idle_are_ignored() {
		let (state, map) = drive(&[
			PointerInput::Move {
				at: Point::new(1.0, 1.0),
			},
			PointerInput::Up,
		]);
		assert_eq!(state, DragState::Idle);
		assert_eq!(map, positions());
	}

	#[test]
	fn press_on_unknown_node_stays_idle() {
		let (state, _) = drive(&[PointerInput::Down {
			node: NodeId(7),
			at: Point::new(0.0, 0.0),
		}]);
		assert_eq!(state, DragState::Idle);
	}

	proptest! {
		#[test]
		fn drag_never_goes_negative(x in -2000.0f64..2000.0, y in -2000.0f64..2000.0) {
			let (_, map) = drive(&[
				PointerInput::Down { node: NodeId(1), at: Point::new(305.0, 42.0) },
				PointerInput::Move { at: Point::new(x, y) },
			]);
			let at = map.get(NodeId(1)).unwrap();
			prop_assert!(at.x >= 0.0 && at.y >= 0.0);
		}
	}
}
