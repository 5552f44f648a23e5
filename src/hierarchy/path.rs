//! Ancestor / descendant queries over a whole snapshot
//!
//! Convenience wrappers that index the snapshot once per call. Callers issuing
//! many queries against the same snapshot should hold a [`CategoryIndex`].

use super::CategoryIndex;
use crate::category::{Category, CategoryId};
use std::collections::HashSet;

/// Categories from the root down to `category_id`, inclusive
///
/// Cycle-guarded; see [`CategoryIndex::path`].
pub fn category_path(categories: &[Category], category_id: &CategoryId) -> Vec<Category> {
    CategoryIndex::new(categories)
        .path(category_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Ids of every ancestor of `category_id`
pub fn ancestor_ids(categories: &[Category], category_id: &CategoryId) -> HashSet<CategoryId> {
    CategoryIndex::new(categories).ancestor_ids(category_id)
}

/// Ids of every descendant of `category_id`
pub fn descendant_ids(categories: &[Category], category_id: &CategoryId) -> HashSet<CategoryId> {
    CategoryIndex::new(categories).descendant_ids(category_id)
}

/// Whether `ancestor_id` is an ancestor of `category_id`
pub fn is_ancestor(categories: &[Category], ancestor_id: &CategoryId, category_id: &CategoryId) -> bool {
    CategoryIndex::new(categories).is_ancestor(ancestor_id, category_id)
}
