pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipe-card")]
#[command(about = "Recipe Card - searchable index over docx recipe documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize the search index with the recipe corpus
    Sync {
        /// Path to the recipe corpus
        #[arg(short, long, env = "RECIPES_PATH")]
        recipes: Option<PathBuf>,

        /// Path for the search index
        #[arg(short, long, env = "INDEX_PATH")]
        index: Option<PathBuf>,
    },

    /// Search indexed recipes
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Path for the search index
        #[arg(short, long, env = "INDEX_PATH")]
        index: Option<PathBuf>,
    },

    /// List the recipes found in the corpus
    List {
        /// Path to the recipe corpus
        #[arg(short, long, env = "RECIPES_PATH")]
        recipes: Option<PathBuf>,

        /// Emit the recipes as JSON instead of summaries
        #[arg(long)]
        json: bool,
    },
}
