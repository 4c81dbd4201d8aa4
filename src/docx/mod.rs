// Document container handling: .docx files are zip'd XML documents.

pub mod container;
pub mod text;

// Re-exports
pub use container::{Docx, DOCUMENT_XML_PATH};
pub use text::body_lines;
