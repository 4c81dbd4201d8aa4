use crate::config::Settings;
use crate::indexer::{sync, SearchIndex};
use crate::recipe::load_corpus;
use crate::Result;

/// Run a full corpus-to-index synchronization pass
pub async fn sync(settings: &Settings) -> Result<()> {
    let corpus = load_corpus(&settings.corpus.root, settings.corpus.concurrency).await?;

    if !corpus.failures.is_empty() {
        println!("{} document(s) could not be parsed:", corpus.failures.len());
        for failure in &corpus.failures {
            println!("  {} - {}", failure.path.display(), failure.error);
        }
    }

    let index = SearchIndex::open(settings.tantivy_path())?;
    let report = sync::run(&index, &settings.cache_path(), &corpus.recipes)?;

    println!(
        "\x1b[32m\u{2713}\x1b[0m Sync complete: {} indexed, {} reindexed, {} removed, {} unchanged",
        report.indexed, report.reindexed, report.removed, report.unchanged
    );

    if report.skipped_untitled + report.skipped_duplicate > 0 {
        println!(
            "  Skipped {} untitled and {} duplicate recipe(s)",
            report.skipped_untitled, report.skipped_duplicate
        );
    }

    if report.index_failures > 0 {
        println!("  {} index operation(s) failed", report.index_failures);
    }

    if !report.cache_persisted {
        println!("  Warning: fingerprint cache was not persisted; next sync will re-index");
    }

    Ok(())
}

/// Query the search index and print ranked titles
pub fn search(settings: &Settings, query: &str, limit: Option<usize>) -> Result<()> {
    let index = SearchIndex::open(settings.tantivy_path())?;
    let limit = limit.unwrap_or(settings.search.default_limit);

    let hits = index.search(query, limit)?;

    if hits.is_empty() {
        println!("No recipes matched {query:?}");
        return Ok(());
    }

    println!("Found {} recipe(s):", hits.len());
    for hit in hits {
        println!("  {:>6.2}  {}", hit.score, hit.title);
    }

    Ok(())
}

/// Load the corpus and print every recipe
pub async fn list(settings: &Settings, json: bool) -> Result<()> {
    let corpus = load_corpus(&settings.corpus.root, settings.corpus.concurrency).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&corpus.recipes)?);
        return Ok(());
    }

    for recipe in &corpus.recipes {
        let title = if recipe.has_title() {
            recipe.title.as_str()
        } else {
            "(untitled)"
        };

        println!("== {} ({})", title, recipe.doc_path.display());
        let summary = recipe.summary();
        if !summary.is_empty() {
            println!("{summary}");
        }
        if !recipe.scan_paths.is_empty() {
            println!("scans: {}", recipe.scan_paths.len());
        }
        println!();
    }

    println!(
        "{} recipe(s), {} unparseable document(s)",
        corpus.recipes.len(),
        corpus.failures.len()
    );

    Ok(())
}
