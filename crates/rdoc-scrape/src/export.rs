//! CSV output: `rdoc.csv` and one matrix file per category.

use crate::error::Result;
use crate::matrix::FeatureMatrix;
use crate::model::HierarchyRow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the hierarchy table with a `domain,construct,subconstruct,url` header.
pub fn write_hierarchy(path: &Path, rows: &[HierarchyRow]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(["domain", "construct", "subconstruct", "url"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote hierarchy");
    Ok(())
}

/// Read a hierarchy table written by [`write_hierarchy`].
pub fn read_hierarchy(path: &Path) -> Result<Vec<HierarchyRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Write one matrix as `<dir>/<category>.csv` and return the path.
pub fn write_matrix(dir: &Path, matrix: &FeatureMatrix) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(matrix.category.file_name());

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(matrix.header())?;
    for i in 0..matrix.vals.len() {
        writer.write_record(matrix.record(i))?;
    }
    writer.flush()?;

    info!(path = %path.display(), terms = matrix.vals.len(), constructs = matrix.columns.len(), "wrote matrix");
    Ok(path)
}

pub fn write_matrices(dir: &Path, matrices: &[FeatureMatrix]) -> Result<Vec<PathBuf>> {
    matrices.iter().map(|m| write_matrix(dir, m)).collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
