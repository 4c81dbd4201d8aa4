use crate::error::{Error, Result};
use crate::recipe::extract::extract_recipe;
use crate::recipe::model::Recipe;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A document that could not be parsed during a load pass
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of a corpus load: successfully extracted recipes in discovery
/// order, plus the per-document failures that were dropped from the set.
#[derive(Debug, Default)]
pub struct CorpusReport {
    pub recipes: Vec<Recipe>,
    pub failures: Vec<DocumentFailure>,
}

/// Walk the corpus root and collect docx paths in discovery order
fn discover_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize()?;

    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(&root) {
        // inability to enumerate the corpus is the one fatal condition
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".docx") {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Load every recipe document under `root`, parsing up to `concurrency`
/// documents at a time. Each document runs as its own blocking task with
/// no shared state; the stream join is the fan-in barrier. Results keep
/// discovery order regardless of completion order, and one bad document
/// never aborts the batch.
pub async fn load_corpus(root: &Path, concurrency: usize) -> Result<CorpusReport> {
    let paths = discover_documents(root)?;
    info!(
        "Found {} recipe documents under {}",
        paths.len(),
        root.display()
    );

    let outcomes: Vec<(PathBuf, Result<Recipe>)> = stream::iter(paths)
        .map(|path| async move {
            let handle = tokio::task::spawn_blocking({
                let path = path.clone();
                move || extract_recipe(&path)
            });

            let outcome = match handle.await {
                Ok(parsed) => parsed,
                Err(join_error) => Err(Error::Join(join_error)),
            };

            (path, outcome)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut report = CorpusReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(recipe) => report.recipes.push(recipe),
            Err(error) => {
                warn!("Dropping document {}: {}", path.display(), error);
                report.failures.push(DocumentFailure { path, error });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, body: &str) {
        let xml = format!("<document><body>{body}</body></document>");
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_load_corpus_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pies")).unwrap();

        write_docx(
            &dir.path().join("pies").join("apple.docx"),
            "<p>recipe</p><p>Apple Pie</p>",
        );
        write_docx(&dir.path().join("stew.docx"), "<p>recipe</p><p>Beef Stew</p>");
        std::fs::write(dir.path().join("readme.txt"), b"not a recipe").unwrap();

        let report = load_corpus(dir.path(), 4).await.unwrap();

        assert_eq!(report.recipes.len(), 2);
        assert!(report.failures.is_empty());

        let mut titles: Vec<&str> = report.recipes.iter().map(|r| r.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Apple Pie", "Beef Stew"]);
    }

    #[tokio::test]
    async fn test_bad_document_is_dropped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();

        write_docx(&dir.path().join("good.docx"), "<p>recipe</p><p>Scones</p>");
        // a docx that is not a zip at all
        std::fs::write(dir.path().join("broken.docx"), b"garbage").unwrap();

        let report = load_corpus(dir.path(), 4).await.unwrap();

        assert_eq!(report.recipes.len(), 1);
        assert_eq!(report.recipes[0].title, "Scones");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0]
            .path
            .to_string_lossy()
            .ends_with("broken.docx"));
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(load_corpus(&missing, 4).await.is_err());
    }
}
