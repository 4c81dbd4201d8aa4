use crate::docx::{body_lines, Docx};
use crate::error::Result;
use crate::recipe::model::{Category, Recipe};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extract a recipe from a docx document on disk.
///
/// Errors from the container or the markup stream propagate unchanged. A
/// document that yields no title or no sections is a valid-but-empty
/// result; the synchronizer decides what to do with it.
pub fn extract_recipe(path: &Path) -> Result<Recipe> {
    debug!("Extracting recipe from {}", path.display());

    let scan_paths = sibling_scans(path)?;

    let file = File::open(path)?;
    let docx = Docx::from_reader(file)?;
    let lines = body_lines(&docx.xml_data)?;
    let (title, sections) = parse_lines(lines);

    Ok(Recipe {
        title,
        sections,
        doc_path: path.to_path_buf(),
        scan_paths,
        image: docx.image,
    })
}

/// Run the two-phase extraction state machine over the document lines.
///
/// Title-seeking phase: a line containing "recipe" (case-insensitive)
/// marks the next line as the title; everything before is discarded.
/// Content phase: a line matching a category name selects the current
/// section, other lines append to it, and lines before the first
/// recognized heading are dropped.
pub fn parse_lines<I>(lines: I) -> (String, BTreeMap<Category, Vec<String>>)
where
    I: IntoIterator<Item = String>,
{
    let mut title = String::new();
    let mut sections: BTreeMap<Category, Vec<String>> = BTreeMap::new();
    let mut title_is_next = false;
    let mut current: Option<Category> = None;

    for line in lines {
        if title.is_empty() {
            if title_is_next {
                title = line;
                continue;
            }

            if line.to_lowercase().contains("recipe") {
                title_is_next = true;
            }

            continue;
        }

        if let Some(category) = Category::from_heading(&line) {
            current = Some(category);
            continue;
        }

        if let Some(category) = current {
            sections.entry(category).or_default().push(line);
        }
    }

    (title, sections)
}

/// List the sibling scan images next to a document, sorted
/// lexicographically so display and digest inputs stay deterministic.
fn sibling_scans(doc_path: &Path) -> Result<Vec<PathBuf>> {
    let dir = doc_path.parent().unwrap_or_else(|| Path::new("."));

    let mut scans = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            scans.push(entry.path());
        }
    }

    scans.sort();

    Ok(scans)
}
