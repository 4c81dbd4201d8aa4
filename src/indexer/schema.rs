use crate::recipe::Category;
use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};

/// Schema for the recipe search index
#[derive(Clone)]
pub struct RecipeSchema {
    pub schema: Schema,
    /// Raw title, the identity key used for deletes
    pub key: Field,
    /// Tokenized title for searching
    pub title: Field,
    pub serves: Field,
    pub oven_temperature: Field,
    pub ingredients: Field,
    pub preparation: Field,
    pub tips: Field,
    pub doc_path: Field,
}

impl RecipeSchema {
    pub fn new() -> Self {
        let mut schema_builder = Schema::builder();

        // Identity key (raw, not tokenized, so delete terms match whole titles)
        let key = schema_builder.add_text_field("key", STRING | STORED);

        // Title (searchable, stored)
        let title = schema_builder.add_text_field("title", TEXT | STORED);

        // One searchable field per recipe category
        let serves = schema_builder.add_text_field("serves", TEXT);
        let oven_temperature = schema_builder.add_text_field("oven_temperature", TEXT);
        let ingredients = schema_builder.add_text_field("ingredients", TEXT);
        let preparation = schema_builder.add_text_field("preparation", TEXT);
        let tips = schema_builder.add_text_field("tips", TEXT);

        // Source document path (stored for display)
        let doc_path = schema_builder.add_text_field("doc_path", TEXT | STORED);

        let schema = schema_builder.build();

        Self {
            schema,
            key,
            title,
            serves,
            oven_temperature,
            ingredients,
            preparation,
            tips,
            doc_path,
        }
    }

    /// The index field holding a category's content
    pub fn category_field(&self, category: Category) -> Field {
        match category {
            Category::Serves => self.serves,
            Category::OvenTemperature => self.oven_temperature,
            Category::Ingredients => self.ingredients,
            Category::Preparation => self.preparation,
            Category::Tips => self.tips,
        }
    }

    /// Every field the query parser should search
    pub fn searchable_fields(&self) -> Vec<Field> {
        vec![
            self.title,
            self.serves,
            self.oven_temperature,
            self.ingredients,
            self.preparation,
            self.tips,
        ]
    }
}

impl Default for RecipeSchema {
    fn default() -> Self {
        Self::new()
    }
}
