//! Which nodes and edges are rendered for a given collapsed set.

use super::types::{CollapsedSet, GraphNode, NodeId, NodeTable};

/// A node is visible when none of its ancestors is collapsed. The root is
/// always visible; unknown ids never are.
pub fn is_visible(id: NodeId, collapsed: &CollapsedSet, table: &NodeTable) -> bool {
	let Some(mut node) = table.get(id) else {
		return false;
	};
	while let Some(parent_id) = node.parent {
		if collapsed.contains(parent_id) {
			return false;
		}
		let Some(parent) = table.get(parent_id) else {
			return false;
		};
		node = parent;
	}
	true
}

/// Visible nodes in pre-order.
pub fn visible_nodes<'a>(
	table: &'a NodeTable,
	collapsed: &'a CollapsedSet,
) -> impl Iterator<Item = &'a GraphNode> + 'a {
	table.iter().filter(move |node| is_visible(node.id, collapsed, table))
}

/// Parent/child pairs whose endpoints are both visible.
pub fn visible_edges<'a>(
	table: &'a NodeTable,
	collapsed: &'a CollapsedSet,
) -> impl Iterator<Item = (&'a GraphNode, &'a GraphNode)> + 'a {
	visible_nodes(table, collapsed).flat_map(move |parent| {
		parent
			.children
			.iter()
			.filter_map(move |id| table.get(*id))
			.filter(move |child| is_visible(child.id, collapsed, table))
			.map(move |child| (parent, child))
	})
}
