//! The closed value model every parser produces and the diagram consumes.

use serde_json::Number;

/// A leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
	Null,
	Bool(bool),
	/// Kept as parsed so the preview shows the source literal.
	Number(Number),
	String(String),
}

impl Scalar {
	/// The literal textual form, as it would be written in JSON.
	pub fn literal(&self) -> String {
		match self {
			Scalar::Null => "null".into(),
			Scalar::Bool(b) => b.to_string(),
			Scalar::Number(n) => n.to_string(),
			Scalar::String(s) => serde_json::Value::String(s.clone()).to_string(),
		}
	}
}

/// A parsed document tree: scalars, ordered sequences and ordered mappings.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Scalar(Scalar),
	Sequence(Vec<Value>),
	/// Entries in source order. Keys are unique.
	Mapping(Vec<(String, Value)>),
}

impl Value {
	/// Shorthand for a string scalar.
	pub fn string(s: impl Into<String>) -> Self {
		Value::Scalar(Scalar::String(s.into()))
	}

	/// Returns the entry stored under `key` when this is a mapping.
	#[cfg(test)]
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
			_ => None,
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Scalar(Scalar::Null),
			serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
			serde_json::Value::Number(n) => Value::Scalar(Scalar::Number(n)),
			serde_json::Value::String(s) => Value::Scalar(Scalar::String(s)),
			serde_json::Value::Array(items) => {
				Value::Sequence(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => {
				Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}
