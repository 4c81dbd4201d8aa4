use crate::error::{Error, Result};
use crate::indexer::schema::RecipeSchema;
use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::{FuzzyTermQuery, QueryParser};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, Term};
use tracing::{debug, info};

/// The search engine capability: index recipes under their title, delete
/// by title, and run ranked queries. Backed by tantivy; callers never see
/// its storage.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    schema: RecipeSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub score: f32,
}

impl SearchIndex {
    /// Create or open a search index in a directory
    pub fn open(index_path: impl AsRef<Path>) -> Result<Self> {
        let path = index_path.as_ref();
        let schema = RecipeSchema::new();

        std::fs::create_dir_all(path)?;

        let index = if path.join("meta.json").exists() {
            Index::open_in_dir(path)
                .map_err(|e| Error::Search(format!("Failed to open index: {e}")))?
        } else {
            Index::create_in_dir(path, schema.schema.clone())
                .map_err(|e| Error::Search(format!("Failed to create index: {e}")))?
        };

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| Error::Search(format!("Failed to create reader: {e}")))?;

        info!("Search index initialized at {:?}", path);

        Ok(Self {
            index,
            reader,
            schema,
        })
    }

    /// Get index writer
    pub fn writer(&self) -> Result<IndexWriter> {
        self.index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| Error::Search(format!("Failed to create writer: {e}")))
    }

    /// Index a recipe under its title
    pub fn index_recipe(&self, writer: &mut IndexWriter, recipe: &Recipe) -> Result<()> {
        debug!("Indexing recipe: {}", recipe.title);

        let mut doc = doc!(
            self.schema.key => recipe.title.clone(),
            self.schema.title => recipe.title.clone(),
            self.schema.doc_path => recipe.doc_path.to_string_lossy().into_owned(),
        );

        for (category, lines) in &recipe.sections {
            doc.add_text(self.schema.category_field(*category), lines.join("\n"));
        }

        writer
            .add_document(doc)
            .map_err(|e| Error::IndexOperationFailed(e.to_string()))?;

        Ok(())
    }

    /// Delete a recipe from the index by title; a no-op when absent
    pub fn delete_recipe(&self, writer: &mut IndexWriter, title: &str) {
        let term = Term::from_field_text(self.schema.key, title);
        writer.delete_term(term);
    }

    /// Commit pending mutations and refresh the reader
    pub fn commit(&self, writer: &mut IndexWriter) -> Result<()> {
        writer
            .commit()
            .map_err(|e| Error::Search(format!("Failed to commit: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| Error::Search(format!("Failed to reload reader: {e}")))?;
        Ok(())
    }

    /// Search recipes, returning ranked titles.
    ///
    /// When the parsed query matches nothing and the input is a single
    /// bare term, a fuzzy query against the title field is tried before
    /// giving up.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let searcher = self.reader.searcher();

        let query_parser = QueryParser::for_index(&self.index, self.schema.searchable_fields());
        let parsed = query_parser
            .parse_query(query)
            .map_err(|e| Error::Search(format!("Invalid query: {e}")))?;

        let mut top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(limit))
            .map_err(|e| Error::Search(format!("Search failed: {e}")))?;

        if top_docs.is_empty() {
            let term = query.trim().to_lowercase();
            if !term.is_empty() && !term.contains(char::is_whitespace) {
                let fuzzy = FuzzyTermQuery::new(
                    Term::from_field_text(self.schema.title, &term),
                    1,
                    true,
                );
                top_docs = searcher
                    .search(&fuzzy, &TopDocs::with_limit(limit))
                    .map_err(|e| Error::Search(format!("Fuzzy search failed: {e}")))?;
            }
        }

        let hits = top_docs
            .into_iter()
            .filter_map(|(score, doc_address)| {
                let doc = searcher.doc::<tantivy::TantivyDocument>(doc_address).ok()?;

                let title = match doc.get_first(self.schema.key)? {
                    tantivy::schema::OwnedValue::Str(s) => s.to_string(),
                    _ => return None,
                };

                Some(SearchHit { title, score })
            })
            .collect();

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Category;
    use tempfile::tempdir;

    fn sample_recipe(title: &str) -> Recipe {
        let mut recipe = Recipe {
            title: title.to_string(),
            doc_path: format!("/recipes/{title}.docx").into(),
            ..Default::default()
        };
        recipe.sections.insert(
            Category::Ingredients,
            vec!["2 cups flour".to_string(), "1 cup sugar".to_string()],
        );
        recipe
    }

    #[test]
    fn test_open_creates_index() {
        let dir = tempdir().unwrap();
        assert!(SearchIndex::open(dir.path()).is_ok());
        // reopening an existing index works too
        assert!(SearchIndex::open(dir.path()).is_ok());
    }

    #[test]
    fn test_index_and_search_by_category_content() {
        let dir = tempdir().unwrap();
        let index = SearchIndex::open(dir.path()).unwrap();

        let mut writer = index.writer().unwrap();
        index
            .index_recipe(&mut writer, &sample_recipe("Apple Pie"))
            .unwrap();
        index.commit(&mut writer).unwrap();

        let hits = index.search("flour", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Apple Pie");
    }

    #[test]
    fn test_delete_removes_recipe() {
        let dir = tempdir().unwrap();
        let index = SearchIndex::open(dir.path()).unwrap();

        let mut writer = index.writer().unwrap();
        index
            .index_recipe(&mut writer, &sample_recipe("Apple Pie"))
            .unwrap();
        index.commit(&mut writer).unwrap();

        index.delete_recipe(&mut writer, "Apple Pie");
        index.commit(&mut writer).unwrap();

        let hits = index.search("apple", 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_fuzzy_fallback_for_near_misses() {
        let dir = tempdir().unwrap();
        let index = SearchIndex::open(dir.path()).unwrap();

        let mut writer = index.writer().unwrap();
        index
            .index_recipe(&mut writer, &sample_recipe("Scones"))
            .unwrap();
        index.commit(&mut writer).unwrap();

        // one edit away from "scones"
        let hits = index.search("sconez", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Scones");
    }
}
