use crate::error::Result;
use crate::indexer::fingerprint::{recipe_digest, FingerprintCache};
use crate::indexer::search::SearchIndex;
use crate::recipe::Recipe;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of one synchronization pass
#[derive(Debug, Default, Clone)]
pub struct SyncReport {
    /// Recipes indexed for the first time
    pub indexed: usize,
    /// Recipes whose content changed and were delete+reindexed
    pub reindexed: usize,
    /// Recipes whose fingerprint matched the cache
    pub unchanged: usize,
    /// Cache entries whose recipe disappeared from the corpus
    pub removed: usize,
    pub skipped_untitled: usize,
    pub skipped_duplicate: usize,
    pub index_failures: usize,
    pub cache_persisted: bool,
}

impl SyncReport {
    /// Number of index mutations performed in this pass. Zero on a
    /// repeat run over an unchanged corpus.
    pub fn mutations(&self) -> usize {
        self.indexed + self.reindexed + self.removed
    }
}

/// Reconcile the loaded recipe corpus with the search index and the
/// fingerprint cache.
///
/// Untitled recipes and duplicate titles (first occurrence wins) are
/// skipped with a log line. New or changed recipes are (re)indexed and
/// their fingerprints updated; cache entries without a surviving recipe
/// are deleted from both the index and the cache. All mutations are
/// committed in one batch at the end.
pub fn synchronize(
    index: &SearchIndex,
    cache: &mut FingerprintCache,
    recipes: &[Recipe],
) -> Result<SyncReport> {
    let mut report = SyncReport {
        cache_persisted: true,
        ..Default::default()
    };

    let mut writer = index.writer()?;
    let mut accepted: HashSet<String> = HashSet::new();

    for recipe in recipes {
        if !recipe.has_title() {
            warn!("Missing title: {}", recipe.doc_path.display());
            report.skipped_untitled += 1;
            continue;
        }

        if !accepted.insert(recipe.title.clone()) {
            warn!(
                "Duplicate recipe title {:?}, keeping first occurrence and skipping {}",
                recipe.title,
                recipe.doc_path.display()
            );
            report.skipped_duplicate += 1;
            continue;
        }

        let digest = recipe_digest(recipe);
        let cached = cache.get(&recipe.title).copied();

        if cached == Some(digest) {
            report.unchanged += 1;
            continue;
        }

        // the index can still hold this title even when the cache does
        // not, e.g. after a lost cache forced a full re-index; the
        // delete is a no-op when the entry is absent
        let stale = cached.is_some();
        index.delete_recipe(&mut writer, &recipe.title);

        match index.index_recipe(&mut writer, recipe) {
            Ok(()) => {
                info!("Indexed {:?} from {}", recipe.title, recipe.doc_path.display());
                cache.insert(recipe.title.clone(), digest);
                if stale {
                    report.reindexed += 1;
                } else {
                    report.indexed += 1;
                }
            }
            Err(e) => {
                // reported, the rest of the pass continues
                warn!("Index operation failed for {:?}: {}", recipe.title, e);
                report.index_failures += 1;
            }
        }
    }

    // deletions and renames on disk: drop whatever the cache still
    // remembers but the corpus no longer contains
    let stale_titles: Vec<String> = cache
        .titles()
        .into_iter()
        .filter(|title| !accepted.contains(title))
        .collect();

    for title in stale_titles {
        info!("Removing missing recipe {:?}", title);
        index.delete_recipe(&mut writer, &title);
        cache.remove(&title);
        report.removed += 1;
    }

    index.commit(&mut writer)?;

    Ok(report)
}

/// Full synchronization pass: load the fingerprint cache, reconcile, and
/// persist the updated cache. A persistence failure is reported in the
/// returned report but never rolls back index mutations.
pub fn run(index: &SearchIndex, cache_path: &Path, recipes: &[Recipe]) -> Result<SyncReport> {
    let mut cache = FingerprintCache::load(cache_path);
    let mut report = synchronize(index, &mut cache, recipes)?;

    if let Err(e) = cache.save(cache_path) {
        warn!(
            "Failed to persist fingerprint cache {}: {}",
            cache_path.display(),
            e
        );
        report.cache_persisted = false;
    }

    Ok(report)
}
