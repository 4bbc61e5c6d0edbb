use thiserror::Error;

/// Why a document could not be turned into a [`Value`](super::Value).
#[derive(Error, Debug)]
pub enum ParseError {
	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid XML: {0}")]
	Xml(#[from] quick_xml::Error),

	#[error("Invalid XML: {0}")]
	MalformedXml(String),
}
