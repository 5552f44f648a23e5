//! Category service: validated writes, hierarchy reads

use super::{CategoryCache, CategoryStore, ServiceError};
use crate::category::{Category, CategoryDraft, CategoryId};
use crate::hierarchy::{
    available_parents, build_hierarchy, build_hierarchy_with, CategoryHierarchyNode, CategoryIndex,
    HierarchyOptions,
};

/// Front door for category reads and writes
///
/// Any write that sets or changes a `parent_id` is checked against the current
/// snapshot first: the parent must exist and must not sit in the category's
/// own subtree. A rejected write never reaches the store. Successful writes
/// invalidate the cache.
#[derive(Debug)]
pub struct CategoryService<S> {
    store: S,
    cache: CategoryCache,
}

impl<S: CategoryStore> CategoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: CategoryCache::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn cache(&self) -> &CategoryCache {
        &self.cache
    }

    pub fn select(&mut self, id: Option<CategoryId>) {
        self.cache.select(id);
    }

    /// Current snapshot, cached
    pub fn categories(&mut self) -> Result<&[Category], ServiceError> {
        Ok(self.cache.snapshot(&self.store)?)
    }

    pub fn hierarchy(&mut self) -> Result<Vec<CategoryHierarchyNode>, ServiceError> {
        Ok(build_hierarchy(self.categories()?))
    }

    pub fn hierarchy_with(
        &mut self,
        options: &HierarchyOptions,
    ) -> Result<Vec<CategoryHierarchyNode>, ServiceError> {
        Ok(build_hierarchy_with(self.categories()?, options)?)
    }

    /// Parent choices when editing `exclude` (or creating, with `None`)
    pub fn available_parents(
        &mut self,
        exclude: Option<&CategoryId>,
    ) -> Result<Vec<CategoryHierarchyNode>, ServiceError> {
        Ok(available_parents(exclude, self.categories()?))
    }

    /// Root-first path to `id`, inclusive
    pub fn path(&mut self, id: &CategoryId) -> Result<Vec<Category>, ServiceError> {
        let index = CategoryIndex::new(self.categories()?);
        if !index.contains(id) {
            return Err(ServiceError::NotFound(id.clone()));
        }
        Ok(index.path(id).into_iter().cloned().collect())
    }

    /// Create a category under a fresh id
    pub fn create(&mut self, draft: CategoryDraft) -> Result<Category, ServiceError> {
        self.create_with_id(CategoryId::generate(), draft)
    }

    /// Create a category under a caller-chosen id, as imports do
    pub fn create_with_id(
        &mut self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, ServiceError> {
        draft.validate()?;
        let snapshot = self.fresh_snapshot()?;
        check_parent(snapshot, &id, draft.parent_id.as_ref())?;
        let category = draft.into_category(id, snapshot.len())?;

        let created = self.store.insert(category)?;
        self.cache.invalidate();
        log::info!("Created category '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Replace the editable fields of `id` with `draft`
    ///
    /// `draft.parent_id` is always applied, so `None` moves the category to root.
    pub fn update(&mut self, id: &CategoryId, draft: CategoryDraft) -> Result<Category, ServiceError> {
        draft.validate()?;
        let mut category = self.existing(id)?;
        if draft.parent_id != category.parent_id {
            let snapshot = self.fresh_snapshot()?;
            check_parent(snapshot, id, draft.parent_id.as_ref())?;
        }
        draft.apply_to(&mut category)?;

        let updated = self.store.update(category)?;
        self.cache.invalidate();
        log::info!("Updated category '{}' ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Move `id` under `new_parent_id`, or to root with `None`
    pub fn reparent(
        &mut self,
        id: &CategoryId,
        new_parent_id: Option<&CategoryId>,
    ) -> Result<Category, ServiceError> {
        let mut category = self.existing(id)?;
        if category.parent_id.as_ref() == new_parent_id {
            return Ok(category);
        }
        let snapshot = self.fresh_snapshot()?;
        check_parent(snapshot, id, new_parent_id)?;
        category.parent_id = new_parent_id.cloned();

        let updated = self.store.update(category)?;
        self.cache.invalidate();
        log::info!(
            "Moved category '{}' under {}",
            updated.id,
            new_parent_id.map(CategoryId::as_str).unwrap_or("<root>")
        );
        Ok(updated)
    }

    /// Delete `id`; its direct children become roots
    pub fn delete(&mut self, id: &CategoryId) -> Result<Category, ServiceError> {
        let removed = self.store.delete(id)?;
        self.cache.invalidate();
        if self.cache.selected() == Some(id) {
            self.cache.select(None);
        }
        log::info!("Deleted category '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Writes validate against the store's current state, not a stale cache
    fn fresh_snapshot(&mut self) -> Result<&[Category], ServiceError> {
        self.cache.invalidate();
        self.categories()
    }

    fn existing(&self, id: &CategoryId) -> Result<Category, ServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }
}

/// Parent must exist and must not create a cycle
fn check_parent(
    snapshot: &[Category],
    id: &CategoryId,
    new_parent_id: Option<&CategoryId>,
) -> Result<(), ServiceError> {
    let index = CategoryIndex::new(snapshot);
    if let Some(parent_id) = new_parent_id {
        if parent_id != id && !index.contains(parent_id) {
            return Err(ServiceError::ParentNotFound(parent_id.clone()));
        }
    }
    index.validate_reparent(id, new_parent_id)?;
    Ok(())
}
