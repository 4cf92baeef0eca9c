//! Binary presence/absence matrices, one per category.

use super::vocabulary::Vocabulary;
use crate::model::{Category, ConstructFeatureSet};
use std::collections::HashSet;

/// Name of the vocabulary column.
pub const VALS_COLUMN: &str = "vals";

/// Presence matrix for one category.
///
/// Rows follow the vocabulary; columns follow the order in which constructs
/// were crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMatrix {
    pub category: Category,
    pub vals: Vec<String>,
    /// `(construct slug, 0/1 vector of vocabulary length)`.
    pub columns: Vec<(String, Vec<u8>)>,
}

impl FeatureMatrix {
    /// `vals` followed by one name per construct.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(VALS_COLUMN.to_string())
            .chain(self.columns.iter().map(|(slug, _)| slug.clone()))
            .collect()
    }

    /// Record `i` as output cells: the item, then its 0/1 flags.
    pub fn record(&self, i: usize) -> Vec<String> {
        std::iter::once(self.vals[i].clone())
            .chain(self.columns.iter().map(|(_, flags)| flags[i].to_string()))
            .collect()
    }
}

/// Build the matrix for one category.
pub fn build_matrix(
    category: Category,
    features: &ConstructFeatureSet,
    vocabulary: &Vocabulary,
) -> FeatureMatrix {
    let vals = vocabulary.terms(category).to_vec();

    let columns = features
        .category(category)
        .into_iter()
        .flat_map(|articles| articles.iter())
        .map(|(slug, items)| {
            let present: HashSet<&str> = items.iter().map(String::as_str).collect();
            let flags = vals
                .iter()
                .map(|v| u8::from(present.contains(v.as_str())))
                .collect();
            (slug.to_string(), flags)
        })
        .collect();

    FeatureMatrix {
        category,
        vals,
        columns,
    }
}

/// Build matrices for every category, in [`Category::ALL`] order.
pub fn build_matrices(features: &ConstructFeatureSet, vocabulary: &Vocabulary) -> Vec<FeatureMatrix> {
    Category::ALL
        .into_iter()
        .map(|category| build_matrix(category, features, vocabulary))
        .collect()
}
