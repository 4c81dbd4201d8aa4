use clap::Parser;
use recipe_card::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_card=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Sync { recipes, index } => {
            if let Some(recipes) = recipes {
                settings.corpus.root = recipes;
            }
            if let Some(index) = index {
                settings.search.index_path = index;
            }

            commands::sync(&settings).await?;
        }
        Commands::Search {
            query,
            limit,
            index,
        } => {
            if let Some(index) = index {
                settings.search.index_path = index;
            }

            commands::search(&settings, &query, limit)?;
        }
        Commands::List { recipes, json } => {
            if let Some(recipes) = recipes {
                settings.corpus.root = recipes;
            }

            commands::list(&settings, json).await?;
        }
    }

    Ok(())
}
