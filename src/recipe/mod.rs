// Recipe extraction: turn docx line sequences into structured recipes
// and load whole corpus directories concurrently.

pub mod corpus;
pub mod extract;
pub mod model;

// Re-exports
pub use corpus::{load_corpus, CorpusReport, DocumentFailure};
pub use extract::extract_recipe;
pub use model::{Category, Recipe};
