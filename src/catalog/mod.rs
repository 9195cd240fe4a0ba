//! Catalog
//!
//! Categories, shop sections and the explicit product to section assignments that the
//! section resolver reads.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod admin;
pub mod assignments;
pub mod filter;
pub mod resolver;

/// Errors raised by catalog admin operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// `All` is reserved and can neither be created nor deleted.
    #[error("\"{}\" is reserved and cannot be changed", Category::ALL)]
    ReservedCategory,

    /// A category with the same name already exists.
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// The category does not exist.
    #[error("Category not found: {0}")]
    UnknownCategory(String),

    /// A section with the same id already exists.
    #[error("Section already exists: {0}")]
    DuplicateSection(SectionId),

    /// The section does not exist.
    #[error("Section not found: {0}")]
    UnknownSection(SectionId),

    /// A required name was blank.
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),
}

/// A product category.
///
/// [`Category::ALL`] is the reserved "no filter" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Name of the reserved sentinel category.
    pub const ALL: &'static str = "All";

    /// Create a category.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `All` sentinel.
    pub fn all() -> Self {
        Self::new(Self::ALL)
    }

    /// Whether this is the `All` sentinel.
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Borrow the category name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shop section identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Create a section id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive an id from a display name: lower-cased, with runs of other characters
    /// collapsed to `-`.
    pub fn slug(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());

        for c in name.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }

        while slug.ends_with('-') {
            slug.pop();
        }

        Self(slug)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A curated shelf on the shop page, grouping one or more categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSection {
    /// Section id
    pub id: SectionId,

    /// Display name
    pub name: String,

    /// Short blurb shown under the name
    #[serde(default)]
    pub description: String,

    /// Categories this section shows, in display order, without duplicates
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Inactive sections are never rendered
    #[serde(default = "active_default")]
    pub active: bool,

    /// Position on the shop page, lowest first
    #[serde(default)]
    pub display_order: u32,
}

fn active_default() -> bool {
    true
}

impl ShopSection {
    /// Create an active section showing the given categories.
    pub fn new(id: impl Into<SectionId>, name: impl Into<String>, categories: &[&str]) -> Self {
        let mut section = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            categories: Vec::with_capacity(categories.len()),
            active: true,
            display_order: 0,
        };

        for category in categories {
            section.add_category(Category::new(*category));
        }

        section
    }

    /// The implicit section used when no sections have been configured.
    pub fn all_products() -> Self {
        Self {
            description: "Everything in the store".to_string(),
            ..Self::new("all-products", "All Products", &[Category::ALL])
        }
    }

    /// Whether the section lists `category` explicitly.
    pub fn includes_category(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    /// Category fallback for products without an explicit assignment: the section matches
    /// if it includes `All` or the product's category.
    pub fn matches_category(&self, category: &Category) -> bool {
        self.categories
            .iter()
            .any(|included| included.is_all() || included == category)
    }

    /// Append a category, keeping the list free of duplicates.
    pub fn add_category(&mut self, category: Category) {
        if !self.includes_category(&category) {
            self.categories.push(category);
        }
    }

    /// Remove a category, returning whether it was present.
    pub fn remove_category(&mut self, category: &Category) -> bool {
        let before = self.categories.len();

        self.categories.retain(|included| included != category);

        self.categories.len() != before
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_is_recognised() {
        assert!(Category::all().is_all());
        assert!(Category::default().is_all());
        assert!(!Category::new("all").is_all());
    }

    #[test]
    fn slug_collapses_punctuation_and_whitespace() {
        assert_eq!(SectionId::slug("  Wedding & Festive!  ").as_str(), "wedding-festive");
        assert_eq!(SectionId::slug("New In").as_str(), "new-in");
    }

    #[test]
    fn section_categories_are_deduplicated() {
        let section = ShopSection::new("formal", "Formal", &["Formal", "Suits", "Formal"]);

        assert_eq!(
            section.categories,
            vec![Category::new("Formal"), Category::new("Suits")]
        );
    }

    #[test]
    fn category_fallback_matches_all_or_exact_category() {
        let formal = ShopSection::new("formal", "Formal", &["Formal"]);
        let everything = ShopSection::new("everything", "Everything", &[Category::ALL]);
        let empty = ShopSection::new("empty", "Empty", &[]);

        assert!(formal.matches_category(&Category::new("Formal")));
        assert!(!formal.matches_category(&Category::new("Casual")));
        assert!(everything.matches_category(&Category::new("Casual")));
        assert!(!empty.matches_category(&Category::new("Casual")));
    }

    #[test]
    fn remove_category_reports_whether_anything_changed() {
        let mut section = ShopSection::new("formal", "Formal", &["Formal", "Wedding"]);

        assert!(section.remove_category(&Category::new("Wedding")));
        assert!(!section.remove_category(&Category::new("Wedding")));
        assert_eq!(section.categories, vec![Category::new("Formal")]);
    }
}
