use crate::error::{Error, Result};
use crate::recipe::Recipe;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use tracing::warn;

/// Width of a recipe fingerprint (SHA-256)
pub const DIGEST_LEN: usize = 32;

pub type Fingerprint = [u8; DIGEST_LEN];

/// Persisted map of recipe title to content fingerprint, used to decide
/// whether the search index needs updating between runs.
///
/// On-disk form is a flat record sequence: title bytes, a newline, then
/// the fixed-width raw digest.
#[derive(Debug, Clone, Default)]
pub struct FingerprintCache {
    entries: HashMap<String, Fingerprint>,
}

impl FingerprintCache {
    /// Load the cache from disk. A missing or malformed file is not
    /// fatal: it degrades to an empty cache, which forces a full
    /// re-index on the next sync.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(
                    "Fingerprint cache {} unavailable, forcing full re-index: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::CacheUnavailable(e.to_string()))?;
        let mut reader = BufReader::new(file);

        let mut entries = HashMap::new();
        loop {
            let mut title_bytes = Vec::new();
            let read = reader
                .read_until(b'\n', &mut title_bytes)
                .map_err(|e| Error::CacheUnavailable(e.to_string()))?;
            if read == 0 {
                break;
            }

            if title_bytes.pop() != Some(b'\n') {
                return Err(Error::CacheUnavailable(
                    "truncated record: missing title terminator".to_string(),
                ));
            }

            let title = String::from_utf8(title_bytes)
                .map_err(|e| Error::CacheUnavailable(e.to_string()))?;

            let mut digest = [0u8; DIGEST_LEN];
            reader
                .read_exact(&mut digest)
                .map_err(|e| Error::CacheUnavailable(e.to_string()))?;

            entries.insert(title, digest);
        }

        Ok(Self { entries })
    }

    /// Overwrite the persisted cache. Not crash-atomic: a partial write
    /// is recovered on the next run by the tolerant loader plus a full
    /// re-index.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file =
            File::create(path).map_err(|e| Error::PersistenceFailed(e.to_string()))?;

        for (title, digest) in &self.entries {
            // a newline inside the title would split the record and
            // corrupt every entry behind it
            if title.contains('\n') {
                warn!(
                    "Not persisting fingerprint for title with embedded newline: {:?}",
                    title
                );
                continue;
            }

            file.write_all(title.as_bytes())
                .and_then(|_| file.write_all(b"\n"))
                .and_then(|_| file.write_all(digest))
                .map_err(|e| Error::PersistenceFailed(e.to_string()))?;
        }

        Ok(())
    }

    pub fn get(&self, title: &str) -> Option<&Fingerprint> {
        self.entries.get(title)
    }

    pub fn insert(&mut self, title: String, digest: Fingerprint) {
        self.entries.insert(title, digest);
    }

    pub fn remove(&mut self, title: &str) {
        self.entries.remove(title);
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fingerprint a recipe's indexed content: the title, then every line of
/// every present category in display-precedence order. Sensitive to both
/// line order and category order, so any content change is detected.
pub fn recipe_digest(recipe: &Recipe) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(recipe.title.as_bytes());

    for lines in recipe.sections.values() {
        for line in lines {
            hasher.update(line.as_bytes());
        }
    }

    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Category;
    use tempfile::tempdir;

    fn recipe_with_line(line: &str) -> Recipe {
        let mut recipe = Recipe {
            title: "Apple Pie".to_string(),
            ..Default::default()
        };
        recipe
            .sections
            .insert(Category::Ingredients, vec![line.to_string()]);
        recipe
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item.idx");

        let mut cache = FingerprintCache::default();
        cache.insert("Apple Pie".to_string(), [7u8; DIGEST_LEN]);
        cache.insert("Beef Stew".to_string(), [9u8; DIGEST_LEN]);
        cache.save(&path).unwrap();

        let loaded = FingerprintCache::load(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("Apple Pie"), Some(&[7u8; DIGEST_LEN]));
        assert_eq!(loaded.get("Beef Stew"), Some(&[9u8; DIGEST_LEN]));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let cache = FingerprintCache::load(&dir.path().join("does_not_exist.idx"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item.idx");
        // a title with no digest behind it
        std::fs::write(&path, b"Apple Pie\nshort").unwrap();

        let cache = FingerprintCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_newline_title_is_dropped_on_save_without_corrupting_others() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item.idx");

        let mut cache = FingerprintCache::default();
        cache.insert("Apple\nPie".to_string(), [1u8; DIGEST_LEN]);
        cache.insert("Beef Stew".to_string(), [2u8; DIGEST_LEN]);
        cache.save(&path).unwrap();

        let loaded = FingerprintCache::load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("Beef Stew"), Some(&[2u8; DIGEST_LEN]));
        assert!(loaded.get("Apple\nPie").is_none());
    }

    #[test]
    fn test_digest_changes_with_line_content() {
        let a = recipe_digest(&recipe_with_line("2 cups flour"));
        let b = recipe_digest(&recipe_with_line("3 cups flour"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_stable_for_same_content() {
        let a = recipe_digest(&recipe_with_line("2 cups flour"));
        let b = recipe_digest(&recipe_with_line("2 cups flour"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_sensitive_to_category() {
        let mut a = Recipe {
            title: "Scones".to_string(),
            ..Default::default()
        };
        a.sections
            .insert(Category::Ingredients, vec!["flour".to_string()]);

        let mut b = Recipe {
            title: "Scones".to_string(),
            ..Default::default()
        };
        b.sections
            .insert(Category::Preparation, vec!["flour".to_string()]);

        // precedence order concatenates a as flour,rest and b as rest,flour
        a.sections.insert(Category::Tips, vec!["rest".to_string()]);
        b.sections.insert(Category::Serves, vec!["rest".to_string()]);

        assert_ne!(recipe_digest(&a), recipe_digest(&b));
    }
}
