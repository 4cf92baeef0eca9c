//! Vocabulary and feature-matrix construction over crawled content.

pub mod builder;
pub mod vocabulary;

pub use builder::{build_matrices, build_matrix, FeatureMatrix};
pub use vocabulary::{build_vocabulary, Vocabulary};
