pub mod document_input;
pub mod hierarchy;
