use super::error::ParseError;
use super::value::Value;

/// Parses JSON text. Any top-level value is accepted.
pub fn parse_json(text: &str) -> Result<Value, ParseError> {
	let parsed: serde_json::Value = serde_json::from_str(text)?;
	Ok(parsed.into())
}
