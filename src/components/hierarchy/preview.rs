use crate::document::Value;

use super::types::GraphNode;

/// Header text of a card.
pub fn display_label(node: &GraphNode) -> String {
	if node.is_root() {
		"(root)".into()
	} else {
		node.label.clone()
	}
}

/// The lines listed inside a card.
pub fn preview_lines(value: &Value) -> Vec<String> {
	match value {
		Value::Scalar(scalar) => vec![scalar.literal()],
		Value::Sequence(items) => vec![format!("[{}]", items.len())],
		Value::Mapping(entries) => entries
			.iter()
			.map(|(key, entry)| format!("{key}: {}", entry_preview(entry)))
			.collect(),
	}
}

fn entry_preview(value: &Value) -> String {
	match value {
		Value::Scalar(scalar) => scalar.literal(),
		Value::Sequence(items) => format!("[{} items]", items.len()),
		Value::Mapping(_) => "{…}".into(),
	}
}

/// Preview lines joined on one line, cut to `max_chars` characters.
pub fn summary(lines: &[String], max_chars: usize) -> String {
	let line = lines.join(", ");
	if line.chars().count() <= max_chars {
		return line;
	}
	if max_chars == 0 {
		return String::new();
	}
	let mut cut: String = line.chars().take(max_chars - 1).collect();
	cut.push('…');
	cut
}
