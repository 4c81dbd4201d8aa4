use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// The recognized recipe section names, in display-precedence order.
///
/// The `Ord` derive follows declaration order, so iterating a
/// `BTreeMap<Category, _>` always yields sections in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "serves")]
    Serves,
    #[serde(rename = "oven temperature")]
    OvenTemperature,
    #[serde(rename = "ingredients")]
    Ingredients,
    #[serde(rename = "preparation")]
    Preparation,
    #[serde(rename = "tips")]
    Tips,
}

impl Category {
    /// All categories in display-precedence order
    pub const ALL: [Category; 5] = [
        Category::Serves,
        Category::OvenTemperature,
        Category::Ingredients,
        Category::Preparation,
        Category::Tips,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Serves => "serves",
            Category::OvenTemperature => "oven temperature",
            Category::Ingredients => "ingredients",
            Category::Preparation => "preparation",
            Category::Tips => "tips",
        }
    }

    /// Match a document line against the recognized category names.
    ///
    /// Only a trailing run of colons is stripped before the lowercased
    /// exact comparison; any other punctuation or wording keeps the line
    /// from matching.
    pub fn from_heading(line: &str) -> Option<Self> {
        let normalized = line.trim_end_matches(':').to_lowercase();
        Category::ALL.into_iter().find(|c| c.name() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recipe extracted from a single docx document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    /// Section content keyed by category; iteration order is the
    /// category display-precedence order.
    pub sections: BTreeMap<Category, Vec<String>>,
    pub doc_path: PathBuf,
    /// Sibling scan images, lexicographically sorted
    pub scan_paths: Vec<PathBuf>,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

impl Recipe {
    /// Whether extraction recovered a usable identity key
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Plain-text rendering of the sections in precedence order
    pub fn summary(&self) -> String {
        let mut output = String::new();

        for (category, lines) in &self.sections {
            if !output.is_empty() {
                output.push('\n');
            }

            output.push_str(category.name());
            output.push('\n');
            output.push_str(&lines.join("\n"));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_match_strips_trailing_colon() {
        assert_eq!(
            Category::from_heading("Ingredients:"),
            Some(Category::Ingredients)
        );
        assert_eq!(
            Category::from_heading("OVEN TEMPERATURE"),
            Some(Category::OvenTemperature)
        );
        assert_eq!(Category::from_heading("Tips::"), Some(Category::Tips));
    }

    #[test]
    fn test_heading_match_is_strict() {
        assert_eq!(Category::from_heading("Ingredients list"), None);
        assert_eq!(Category::from_heading("prep"), None);
        // an interior colon is not trailing punctuation
        assert_eq!(Category::from_heading("oven: temperature"), None);
    }

    #[test]
    fn test_sections_iterate_in_precedence_order() {
        let mut recipe = Recipe {
            title: "Apple Pie".to_string(),
            ..Default::default()
        };
        recipe
            .sections
            .insert(Category::Tips, vec!["serve warm".to_string()]);
        recipe
            .sections
            .insert(Category::Serves, vec!["8".to_string()]);
        recipe
            .sections
            .insert(Category::Ingredients, vec!["2 cups flour".to_string()]);

        let order: Vec<Category> = recipe.sections.keys().copied().collect();
        assert_eq!(
            order,
            vec![Category::Serves, Category::Ingredients, Category::Tips]
        );
    }

    #[test]
    fn test_summary_renders_sections_in_order() {
        let mut recipe = Recipe {
            title: "Apple Pie".to_string(),
            ..Default::default()
        };
        recipe
            .sections
            .insert(Category::Preparation, vec!["bake".to_string()]);
        recipe.sections.insert(
            Category::Ingredients,
            vec!["flour".to_string(), "sugar".to_string()],
        );

        assert_eq!(recipe.summary(), "ingredients\nflour\nsugar\npreparation\nbake");
    }
}
