//! Caller-owned snapshot cache

use super::{CategoryStore, StoreError};
use crate::category::{Category, CategoryId};

/// Last fetched snapshot and the currently selected category
///
/// Holds no hierarchy; trees are recomputed from the snapshot on demand.
#[derive(Debug, Clone, Default)]
pub struct CategoryCache {
    snapshot: Option<Vec<Category>>,
    selected: Option<CategoryId>,
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, fetched from `store` on a miss
    pub fn snapshot<S>(&mut self, store: &S) -> Result<&[Category], StoreError>
    where
        S: CategoryStore + ?Sized,
    {
        if self.snapshot.is_none() {
            let categories = store.list()?;
            log::debug!("Category cache loaded {} categories", categories.len());
            self.snapshot = Some(categories);
        }
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Drop the snapshot; the next read refetches
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn select(&mut self, id: Option<CategoryId>) {
        self.selected = id;
    }

    pub fn selected(&self) -> Option<&CategoryId> {
        self.selected.as_ref()
    }

    /// The selected category, if it is in the cached snapshot
    pub fn selected_category(&self) -> Option<&Category> {
        let selected = self.selected.as_ref()?;
        self.snapshot
            .as_ref()?
            .iter()
            .find(|category| &category.id == selected)
    }
}
