//! Core data types shared by the pipeline stages.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Value stored in the `subconstruct` column of a construct row.
pub const NO_SUBCONSTRUCT: &str = "none";

/// Content category of an `rdoc-unit` block on a construct page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Molecule,
    Cell,
    Circuit,
    PhysFunction,
    Behavior,
    SelfReport,
    Paradigm,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Category; 7] = [
        Category::Molecule,
        Category::Cell,
        Category::Circuit,
        Category::PhysFunction,
        Category::Behavior,
        Category::SelfReport,
        Category::Paradigm,
    ];

    /// Identifier used in block ids and output file names.
    pub fn name(self) -> &'static str {
        match self {
            Category::Molecule => "molecule",
            Category::Cell => "cell",
            Category::Circuit => "circuit",
            Category::PhysFunction => "physfunction",
            Category::Behavior => "behavior",
            Category::SelfReport => "selfreport",
            Category::Paradigm => "paradigm",
        }
    }

    /// Match a block id such as `circuit_acute-threat` to its category.
    pub fn from_block_id(id: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| id.starts_with(c.name()))
    }

    /// Output file name, e.g. `circuit.csv`.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of `rdoc.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyRow {
    pub domain: String,
    pub construct: String,
    /// Subconstruct tag, or [`NO_SUBCONSTRUCT`] for a construct row.
    pub subconstruct: String,
    pub url: String,
}

impl HierarchyRow {
    /// Last non-empty path segment of the row URL.
    pub fn slug(&self) -> &str {
        url_slug(&self.url)
    }
}

/// Last non-empty `/`-separated segment of a URL, ignoring query and fragment.
pub fn url_slug(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("")
}

/// Line items crawled for one category, keyed by construct slug.
///
/// Slugs keep the order in which they were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryArticles {
    order: Vec<String>,
    items: HashMap<String, Vec<String>>,
}

impl CategoryArticles {
    /// Insert or replace the items for `slug`.
    pub fn insert(&mut self, slug: &str, items: Vec<String>) {
        if self.items.insert(slug.to_string(), items).is_none() {
            self.order.push(slug.to_string());
        }
    }

    /// `(slug, items)` pairs in first-crawled order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(|slug| (slug.as_str(), self.items[slug].as_slice()))
    }
}

/// Everything the feature crawler found: category → construct → items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructFeatureSet {
    categories: BTreeMap<Category, CategoryArticles>,
}

impl ConstructFeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, slug: &str, items: Vec<String>) {
        self.categories
            .entry(category)
            .or_default()
            .insert(slug, items);
    }

    /// Articles for a category, if any construct exposed it.
    pub fn category(&self, category: Category) -> Option<&CategoryArticles> {
        self.categories.get(&category)
    }
}
