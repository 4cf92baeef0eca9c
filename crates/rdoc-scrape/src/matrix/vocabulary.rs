//! Per-category vocabulary of distinct line items.

use crate::model::{Category, ConstructFeatureSet};
use std::collections::{BTreeMap, BTreeSet};

/// Sorted, deduplicated items for every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: BTreeMap<Category, Vec<String>>,
}

impl Vocabulary {
    /// Terms for `category`; empty when nothing was crawled for it.
    pub fn terms(&self, category: Category) -> &[String] {
        self.terms.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_terms(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

/// Collect every item of every construct, per category, sorted bytewise.
pub fn build_vocabulary(features: &ConstructFeatureSet) -> Vocabulary {
    let mut terms = BTreeMap::new();

    for category in Category::ALL {
        let distinct: BTreeSet<&str> = features
            .category(category)
            .into_iter()
            .flat_map(|articles| articles.iter())
            .flat_map(|(_, items)| items.iter().map(String::as_str))
            .collect();
        terms.insert(
            category,
            distinct.into_iter().map(str::to_string).collect(),
        );
    }

    Vocabulary { terms }
}
