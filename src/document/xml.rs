//! XML to [`Value`] conversion.
//!
//! The document element becomes the top-level mapping. Attributes are stored
//! as `@_<name>`, text content as `#text`, and repeated child tags collapse
//! into one sequence-valued entry.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::ParseError;
use super::value::Value;

pub const ATTRIBUTE_PREFIX: &str = "@_";
pub const TEXT_KEY: &str = "#text";
/// Deepest element nesting accepted, matching serde_json's recursion limit.
pub const MAX_DEPTH: usize = 128;

struct OpenElement {
	name: String,
	entries: Vec<(String, Value)>,
}

/// Parses XML text into a mapping for its document element.
pub fn parse_xml(text: &str) -> Result<Value, ParseError> {
	let mut reader = Reader::from_str(text);
	reader.config_mut().trim_text(true);

	let mut stack: Vec<OpenElement> = Vec::new();
	let mut root: Option<Value> = None;

	loop {
		match reader.read_event()? {
			Event::Start(start) => {
				ensure_single_root(&stack, &root)?;
				if stack.len() >= MAX_DEPTH {
					return Err(ParseError::MalformedXml("nesting too deep".into()));
				}
				stack.push(OpenElement {
					name: tag_name(&start),
					entries: attributes(&start)?,
				});
			}
			Event::Empty(start) => {
				ensure_single_root(&stack, &root)?;
				let element = Value::Mapping(attributes(&start)?);
				close_element(&mut stack, &mut root, tag_name(&start), element);
			}
			Event::End(_) => {
				let Some(open) = stack.pop() else {
					return Err(ParseError::MalformedXml("unexpected closing tag".into()));
				};
				close_element(&mut stack, &mut root, open.name, Value::Mapping(open.entries));
			}
			Event::Text(content) => {
				let content = content.unescape()?;
				push_text(&mut stack, content.trim())?;
			}
			Event::CData(data) => {
				let raw = data.into_inner();
				push_text(&mut stack, String::from_utf8_lossy(&raw).trim())?;
			}
			Event::Eof => break,
			// declarations, comments, processing instructions, doctype
			_ => {}
		}
	}

	if let Some(open) = stack.last() {
		return Err(ParseError::MalformedXml(format!(
			"unclosed element <{}>",
			open.name
		)));
	}
	root.ok_or_else(|| ParseError::MalformedXml("no root element".into()))
}

fn tag_name(start: &BytesStart) -> String {
	String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attributes(start: &BytesStart) -> Result<Vec<(String, Value)>, ParseError> {
	let mut entries = Vec::new();
	for attr in start.attributes() {
		let attr = attr.map_err(quick_xml::Error::from)?;
		let key = String::from_utf8_lossy(attr.key.as_ref());
		let value = attr.unescape_value()?;
		entries.push((
			format!("{ATTRIBUTE_PREFIX}{key}"),
			Value::string(value.into_owned()),
		));
	}
	Ok(entries)
}

fn ensure_single_root(stack: &[OpenElement], root: &Option<Value>) -> Result<(), ParseError> {
	if stack.is_empty() && root.is_some() {
		return Err(ParseError::MalformedXml("more than one root element".into()));
	}
	Ok(())
}

fn close_element(
	stack: &mut [OpenElement],
	root: &mut Option<Value>,
	name: String,
	element: Value,
) {
	match stack.last_mut() {
		Some(parent) => insert_child(&mut parent.entries, name, element),
		None => *root = Some(element),
	}
}

fn insert_child(entries: &mut Vec<(String, Value)>, name: String, element: Value) {
	let Some((_, existing)) = entries.iter_mut().find(|(k, _)| *k == name) else {
		entries.push((name, element));
		return;
	};
	match existing {
		Value::Sequence(items) => items.push(element),
		other => {
			let first = std::mem::replace(other, Value::Sequence(Vec::new()));
			*other = Value::Sequence(vec![first, element]);
		}
	}
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<(), ParseError> {
	if text.is_empty() {
		return Ok(());
	}
	let Some(open) = stack.last_mut() else {
		return Err(ParseError::MalformedXml(
			"text outside of the root element".into(),
		));
	};
	match open.entries.iter_mut().find(|(k, _)| k == TEXT_KEY) {
		Some((_, value)) => *value = Value::string(text),
		None => open.entries.push((TEXT_KEY.into(), Value::string(text))),
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn maps_attributes_text_and_children() {
		let value = parse_xml(
			r#"<?xml version="1.0"?>
			<library id="l1">
				<!-- catalogue -->
				<name>City &amp; County</name>
				<open/>
			</library>"#,
		)
		.unwrap();

		assert_eq!(
			value,
			Value::Mapping(vec![
				("@_id".into(), Value::string("l1")),
				(
					"name".into(),
					Value::Mapping(vec![("#text".into(), Value::string("City & County"))])
				),
				("open".into(), Value::Mapping(vec![])),
			])
		);
	}

	#[test]
	fn repeated_tags_become_a_sequence() {
		let value = parse_xml("<r><item n=\"1\"/><other/><item n=\"2\"/><item n=\"3\"/></r>").unwrap();
		let Some(Value::Sequence(items)) = value.get("item") else {
			panic!("expected item to be a sequence");
		};
		let numbers: Vec<&Value> = items.iter().filter_map(|i| i.get("@_n")).collect();
		assert_eq!(
			numbers,
			[&Value::string("1"), &Value::string("2"), &Value::string("3")]
		);
		assert_eq!(value.get("other"), Some(&Value::Mapping(vec![])));
	}

	#[test]
	fn cdata_is_text() {
		let value = parse_xml("<a><![CDATA[ x < y ]]></a>").unwrap();
		assert_eq!(value.get("#text"), Some(&Value::string("x < y")));
	}

	fn nested(depth: usize) -> String {
		format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
	}

	#[test]
	fn nesting_depth_is_limited() {
		assert!(parse_xml(&nested(MAX_DEPTH)).is_ok());
		// self-closing elements at the limit are leaves and stay accepted
		assert!(parse_xml(&format!("{}<b/>{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH))).is_ok());

		let err = parse_xml(&nested(MAX_DEPTH + 1)).unwrap_err();
		assert_eq!(err.to_string(), "Invalid XML: nesting too deep");
		assert!(parse_xml(&nested(5000)).is_err());
	}

	#[test]
	fn rejects_malformed_documents() {
		assert!(parse_xml("<a><b></a>").is_err());
		assert!(parse_xml("<a><b>").is_err());
		assert!(parse_xml("").is_err());
		assert!(parse_xml("<a/><b/>").is_err());
		assert!(parse_xml("stray <a/>").is_err());
	}
}
