//! Document parsing boundary: raw text in, [`Value`] tree or [`ParseError`] out.

mod error;
mod json;
mod session;
mod value;
mod xml;

pub use error::ParseError;
pub use json::parse_json;
pub use session::{DocumentSession, LoadedDocument};
pub use value::{Scalar, Value};
pub use xml::parse_xml;

/// Which parser a piece of text goes through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentMode {
	#[default]
	Json,
	Xml,
}

impl DocumentMode {
	pub const ALL: [DocumentMode; 2] = [DocumentMode::Json, DocumentMode::Xml];

	/// Picks a mode from a file name; anything that is not `.xml` is JSON.
	pub fn from_file_name(name: &str) -> Self {
		let is_xml = name
			.rsplit_once('.')
			.is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("xml"));
		if is_xml { DocumentMode::Xml } else { DocumentMode::Json }
	}

	pub fn name(self) -> &'static str {
		match self {
			DocumentMode::Json => "json",
			DocumentMode::Xml => "xml",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|mode| mode.name() == name)
	}
}

/// Parses `text` with the parser for `mode`.
pub fn parse_document(text: &str, mode: DocumentMode) -> Result<Value, ParseError> {
	match mode {
		DocumentMode::Json => parse_json(text),
		DocumentMode::Xml => parse_xml(text),
	}
}
