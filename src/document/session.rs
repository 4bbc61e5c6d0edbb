use std::sync::Arc;

use log::{info, warn};

use super::{DocumentMode, ParseError, parse_document};
use crate::components::hierarchy::{NodeTable, build};

/// Label given to the node built from the top-level value.
pub const ROOT_LABEL: &str = "root";

/// A successfully built node table, tagged with the load it came from.
///
/// Two documents compare equal only when they come from the same load, so a
/// rebuild from identical text still counts as a new document.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
	pub revision: u64,
	pub table: Arc<NodeTable>,
}

impl PartialEq for LoadedDocument {
	fn eq(&self, other: &Self) -> bool {
		self.revision == other.revision
	}
}

/// The text being edited, its mode, and the last tree that parsed.
///
/// A failed parse records the error but keeps the previous tree on screen.
#[derive(Clone, Debug, Default)]
pub struct DocumentSession {
	mode: DocumentMode,
	text: String,
	document: Option<LoadedDocument>,
	error: Option<String>,
	revision: u64,
}

impl DocumentSession {
	pub fn new(text: impl Into<String>, mode: DocumentMode) -> Self {
		let mut session = Self::default();
		// a bad initial document leaves the session empty with the error set
		let _ = session.load(text, mode);
		session
	}

	/// Replaces the text and rebuilds the tree from it.
	pub fn load(&mut self, text: impl Into<String>, mode: DocumentMode) -> Result<(), ParseError> {
		self.text = text.into();
		self.mode = mode;
		match parse_document(&self.text, mode) {
			Ok(value) => {
				let table = build(&value, ROOT_LABEL);
				self.revision += 1;
				info!(
					"Loaded {} document: {} nodes (revision {})",
					mode.name(),
					table.len(),
					self.revision
				);
				self.document = Some(LoadedDocument {
					revision: self.revision,
					table: Arc::new(table),
				});
				self.error = None;
				Ok(())
			}
			Err(err) => {
				warn!("Keeping previous tree: {err}");
				self.error = Some(err.to_string());
				Err(err)
			}
		}
	}

	/// Re-parses the current text with another parser.
	pub fn set_mode(&mut self, mode: DocumentMode) -> Result<(), ParseError> {
		let text = std::mem::take(&mut self.text);
		self.load(text, mode)
	}

	/// Records a failure that happened before any text reached the parser.
	pub fn report_read_error(&mut self, message: impl Into<String>) {
		let message = message.into();
		warn!("{message}");
		self.error = Some(message);
	}

	pub fn mode(&self) -> DocumentMode {
		self.mode
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn document(&self) -> Option<LoadedDocument> {
		self.document.clone()
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}
}
