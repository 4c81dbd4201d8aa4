pub mod cli;
pub mod config;
pub mod docx;
pub mod error;
pub mod indexer;
pub mod recipe;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
