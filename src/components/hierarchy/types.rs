use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::document::{Scalar, Value};

/// Index of a node in its [`NodeTable`]. Only meaningful for the table that
/// produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "n{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	String,
	Number,
	Boolean,
	Null,
	Array,
	Object,
}

impl NodeKind {
	pub fn of(value: &Value) -> Self {
		match value {
			Value::Scalar(Scalar::String(_)) => NodeKind::String,
			Value::Scalar(Scalar::Number(_)) => NodeKind::Number,
			Value::Scalar(Scalar::Bool(_)) => NodeKind::Boolean,
			Value::Scalar(Scalar::Null) => NodeKind::Null,
			Value::Sequence(_) => NodeKind::Array,
			Value::Mapping(_) => NodeKind::Object,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			NodeKind::String => "string",
			NodeKind::Number => "number",
			NodeKind::Boolean => "boolean",
			NodeKind::Null => "null",
			NodeKind::Array => "array",
			NodeKind::Object => "object",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	/// Key name, `[i]` for sequence elements, or the root label.
	pub label: String,
	pub kind: NodeKind,
	/// Card lines describing the value this node was built from.
	pub preview: Vec<String>,
	pub parent: Option<NodeId>,
	pub depth: usize,
	/// Source order.
	pub children: Vec<NodeId>,
	/// Key of the sequence-valued property this node was reached through.
	pub edge_label: Option<String>,
}

impl GraphNode {
	pub fn is_root(&self) -> bool {
		self.parent.is_none()
	}
}

/// Every node of one document, in pre-order. `NodeId(i)` is the node at index
/// `i`, and index 0 is the root.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTable {
	nodes: Vec<GraphNode>,
}

impl NodeTable {
	pub(super) fn from_nodes(nodes: Vec<GraphNode>) -> Self {
		debug_assert!(!nodes.is_empty());
		Self { nodes }
	}

	#[cfg(test)]
	pub fn root_id(&self) -> NodeId {
		NodeId(0)
	}

	#[cfg(test)]
	pub fn root(&self) -> &GraphNode {
		&self.nodes[0]
	}

	pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
		self.nodes.get(id.0)
	}

	/// Nodes in pre-order.
	pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}
}

/// Screen coordinates of a card's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset_from(self, origin: Point) -> Point {
		Point::new(self.x - origin.x, self.y - origin.y)
	}

	pub fn clamp_non_negative(self) -> Point {
		Point::new(self.x.max(0.0), self.y.max(0.0))
	}
}

/// Current position of every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionMap(HashMap<NodeId, Point>);

impl PositionMap {
	pub fn get(&self, id: NodeId) -> Option<Point> {
		self.0.get(&id).copied()
	}

	/// Copy of this map with `id` moved to `at`.
	pub fn with(&self, id: NodeId, at: Point) -> Self {
		let mut next = self.clone();
		next.0.insert(id, at);
		next
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.0.len()
	}
}

impl FromIterator<(NodeId, Point)> for PositionMap {
	fn from_iter<I: IntoIterator<Item = (NodeId, Point)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Nodes whose descendants are hidden.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapsedSet(HashSet<NodeId>);

impl CollapsedSet {
	pub fn contains(&self, id: NodeId) -> bool {
		self.0.contains(&id)
	}

	/// Copy of this set with membership of `id` flipped.
	pub fn toggled(&self, id: NodeId) -> Self {
		let mut next = self.clone();
		if !next.0.remove(&id) {
			next.0.insert(id);
		}
		next
	}
}

impl FromIterator<NodeId> for CollapsedSet {
	fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}
