//! Flattens a [`Value`] tree into a [`NodeTable`].
//!
//! Only containers get cards. Scalar entries of a mapping are shown inside the
//! mapping's card, and sequences never get a card of their own: their
//! elements hang directly off the mapping that holds the sequence, each
//! carrying the sequence's key as an edge label.

use crate::document::Value;

use super::preview::preview_lines;

use super::types::{GraphNode, NodeId, NodeKind, NodeTable};

/// Builds the node table for `value`. The result always holds at least the
/// root node, labelled `root_label`.
pub fn build(value: &Value, root_label: &str) -> NodeTable {
	let mut builder = Builder::default();
	builder.add_node(value, root_label.to_owned(), None, 0, None);
	NodeTable::from_nodes(builder.nodes)
}

#[derive(Default)]
struct Builder {
	nodes: Vec<GraphNode>,
}

impl Builder {
	fn add_node(
		&mut self,
		value: &Value,
		label: String,
		parent: Option<NodeId>,
		depth: usize,
		edge_label: Option<String>,
	) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(GraphNode {
			id,
			label,
			kind: NodeKind::of(value),
			preview: preview_lines(value),
			parent,
			depth,
			children: Vec::new(),
			edge_label,
		});

		let mut children = Vec::new();
		match value {
			Value::Mapping(entries) => {
				for (key, entry) in entries {
					match entry {
						Value::Scalar(_) => {}
						Value::Mapping(_) => {
							let child = self.add_node(entry, key.clone(), Some(id), depth + 1, None);
							children.push(child);
						}
						Value::Sequence(items) => {
							self.add_elements(items, "", id, depth + 1, Some(key.as_str()), &mut children)
						}
					}
				}
			}
			// only reachable for a top-level sequence
			Value::Sequence(items) => self.add_elements(items, "", id, depth + 1, None, &mut children),
			Value::Scalar(_) => {}
		}
		self.nodes[id.0].children = children;
		id
	}

	/// Attaches every element of `items` to `parent`. Nested sequences are
	/// unwrapped into the same parent with compound labels (`[0][1]`).
	fn add_elements(
		&mut self,
		items: &[Value],
		prefix: &str,
		parent: NodeId,
		depth: usize,
		edge_label: Option<&str>,
		children: &mut Vec<NodeId>,
	) {
		for (i, item) in items.iter().enumerate() {
			let label = format!("{prefix}[{i}]");
			match item {
				Value::Sequence(inner) => {
					self.add_elements(inner, &label, parent, depth, edge_label, children)
				}
				_ => {
					let child =
						self.add_node(item, label, Some(parent), depth, edge_label.map(str::to_owned));
					children.push(child);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hierarchy::testing::{arb_value, json};
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	fn labels(table: &NodeTable, ids: &[NodeId]) -> Vec<String> {
		ids.iter().map(|id| table.get(*id).unwrap().label.clone()).collect()
	}

	#[test]
	fn scalar_entries_stay_inline() {
		let table = build(&json(r#"{"a": 1, "b": {"c": 2}}"#), "root");
		assert_eq!(table.len(), 2);

		let root = table.root();
		assert_eq!(root.kind, NodeKind::Object);
		assert_eq!(labels(&table, &root.children), ["b"]);

		let b = table.get(root.children[0]).unwrap();
		assert_eq!(b.depth, 1);
		assert_eq!(b.edge_label, None);
		assert!(b.children.is_empty());
	}

	#[test]
	fn nodes_carry_preview_of_their_own_value() {
		let table = build(&json(r#"{"a": 1, "b": {"c": {"d": 3}}}"#), "root");
		let root = table.root();
		assert_eq!(root.preview, ["a: 1", "b: {…}"]);

		let b = table.get(root.children[0]).unwrap();
		assert_eq!(b.preview, ["c: {…}"]);
		let c = table.get(b.children[0]).unwrap();
		assert_eq!(c.preview, ["d: 3"]);
	}

	#[test]
	fn sequence_elements_unwrap_into_owner() {
		let table = build(&json(r#"{"list": [{"x": 1}, {"x": 2}]}"#), "root");
		assert_eq!(table.len(), 3);

		let root = table.root();
		assert_eq!(labels(&table, &root.children), ["[0]", "[1]"]);
		for id in &root.children {
			let child = table.get(*id).unwrap();
			assert_eq!(child.edge_label.as_deref(), Some("list"));
			assert_eq!(child.parent, Some(root.id));
			assert_eq!(child.depth, 1);
		}
	}

	#[test]
	fn nested_sequences_flatten_with_compound_labels() {
		let table = build(&json(r#"{"grid": [[1, 2], [3]], "tags": ["a"]}"#), "root");
		let root = table.root();
		assert_eq!(
			labels(&table, &root.children),
			["[0][0]", "[0][1]", "[1][0]", "[0]"]
		);
		let edge_labels: Vec<Option<&str>> = root
			.children
			.iter()
			.map(|id| table.get(*id).unwrap().edge_label.as_deref())
			.collect();
		assert_eq!(
			edge_labels,
			[Some("grid"), Some("grid"), Some("grid"), Some("tags")]
		);
		assert!(
			root.children
				.iter()
				.all(|id| table.get(*id).unwrap().kind != NodeKind::Array)
		);
	}

	#[test]
	fn top_level_scalar_is_single_node() {
		let table = build(&json("42"), "root");
		assert_eq!(table.len(), 1);
		assert_eq!(table.root().kind, NodeKind::Number);
		assert_eq!(table.root().label, "root");
		assert!(table.root().children.is_empty());
	}

	#[test]
	fn top_level_sequence_is_root_with_elements() {
		let table = build(&json(r#"[{"a": 1}, "s"]"#), "root");
		let root = table.root();
		assert_eq!(root.kind, NodeKind::Array);
		assert_eq!(labels(&table, &root.children), ["[0]", "[1]"]);
		assert_eq!(table.get(root.children[1]).unwrap().kind, NodeKind::String);
		assert_eq!(table.get(root.children[0]).unwrap().edge_label, None);
	}

	#[test]
	fn ids_follow_pre_order() {
		let table = build(&json(r#"{"a": {"b": {}}, "c": {}}"#), "root");
		let order: Vec<&str> = table.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(order, ["root", "a", "b", "c"]);
		for (i, node) in table.iter().enumerate() {
			assert_eq!(node.id, NodeId(i));
		}
	}

	proptest! {
		#[test]
		fn build_is_a_tree(value in arb_value()) {
			let table = build(&value, "root");
			prop_assert!(table.len() >= 1);
			prop_assert_eq!(table.iter().filter(|n| n.parent.is_none()).count(), 1);
			prop_assert!(table.root().is_root());

			let mut seen = vec![0usize; table.len()];
			let mut stack = vec![table.root_id()];
			while let Some(id) = stack.pop() {
				seen[id.0] += 1;
				let node = table.get(id).unwrap();
				for child_id in &node.children {
					let child = table.get(*child_id).unwrap();
					prop_assert_eq!(child.parent, Some(id));
					prop_assert_eq!(child.depth, node.depth + 1);
					prop_assert!(child_id.0 > id.0);
					stack.push(*child_id);
				}
			}
			prop_assert!(seen.iter().all(|&count| count == 1));
		}

		#[test]
		fn build_is_deterministic(value in arb_value()) {
			prop_assert_eq!(build(&value, "root"), build(&value, "root"));
		}
	}
}
