//! Snapshot files
//!
//! A snapshot is the flat category collection as exported from the store,
//! either a JSON array or a CSV table. Missing `slug` and `sortOrder` values
//! get the usual defaults (derived slug, 0-based row position).

use catalog_hierarchy::{Category, CategoryDraft, CategoryError, CategoryId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported snapshot format for {} (expected .json or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid CSV snapshot: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid category at row {row} ('{id}'): {source}")]
    Category {
        row: usize,
        id: CategoryId,
        source: CategoryError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("csv") => Ok(SnapshotFormat::Csv),
            _ => Err(SnapshotError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// One exported record; defaults are applied on conversion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    id: CategoryId,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parent_id: Option<CategoryId>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    sort_order: Option<i32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl SnapshotRecord {
    fn into_category(self, row: usize) -> Result<Category, SnapshotError> {
        let draft = CategoryDraft {
            name: self.name,
            slug: self.slug.filter(|slug| !slug.is_empty()),
            description: self.description.filter(|text| !text.is_empty()),
            parent_id: self.parent_id.filter(|id| !id.as_str().is_empty()),
            image: self.image.filter(|url| !url.is_empty()),
            is_active: self.is_active,
            sort_order: self.sort_order,
        };
        let id = self.id;
        let mut category = draft
            .into_category(id.clone(), row)
            .map_err(|source| SnapshotError::Category { row, id, source })?;
        category.created_at = self.created_at;
        category.updated_at = self.updated_at;
        Ok(category)
    }
}

/// Parse a snapshot from text in the given format
pub fn parse_snapshot(text: &str, format: SnapshotFormat) -> Result<Vec<Category>, SnapshotError> {
    let records: Vec<SnapshotRecord> = match format {
        SnapshotFormat::Json => serde_json::from_str(text)?,
        SnapshotFormat::Csv => csv::Reader::from_reader(text.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()?,
    };
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| record.into_category(row))
        .collect()
}

/// Load a snapshot file; the format follows the extension
pub fn load_snapshot(path: &Path) -> Result<Vec<Category>, SnapshotError> {
    let format = SnapshotFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let categories = parse_snapshot(&text, format)?;
    log::debug!("Loaded {} categories from {}", categories.len(), path.display());
    Ok(categories)
}

/// Write a snapshot as pretty JSON
pub fn save_snapshot(path: &Path, categories: &[Category]) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(categories)?;
    fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} categories to {}", categories.len(), path.display());
    Ok(())
}
