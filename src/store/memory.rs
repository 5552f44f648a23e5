//! In-memory [`CategoryStore`]

use super::{CategoryStore, StoreError};
use crate::category::{Category, CategoryId};
use chrono::Utc;

/// Ordered, in-process category table
///
/// Mirrors the relational table's behaviour that matters to the hierarchy:
/// unique ids, insertion order and `ON DELETE SET NULL` on `parent_id`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    categories: Vec<Category>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as loaded from an export
    ///
    /// Records are taken as they are; duplicate ids are not re-checked.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_inner(self) -> Vec<Category> {
        self.categories
    }

    fn position(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|category| &category.id == id)
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn list(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.clone())
    }

    fn get(&self, id: &CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.position(id).map(|position| self.categories[position].clone()))
    }

    fn insert(&mut self, mut category: Category) -> Result<Category, StoreError> {
        if self.position(&category.id).is_some() {
            return Err(StoreError::DuplicateId(category.id));
        }
        let now = Utc::now();
        category.created_at = Some(now);
        category.updated_at = Some(now);
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update(&mut self, mut category: Category) -> Result<Category, StoreError> {
        let position = self
            .position(&category.id)
            .ok_or_else(|| StoreError::NotFound(category.id.clone()))?;
        category.created_at = self.categories[position].created_at;
        category.updated_at = Some(Utc::now());
        self.categories[position] = category.clone();
        Ok(category)
    }

    fn delete(&mut self, id: &CategoryId) -> Result<Category, StoreError> {
        let position = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let removed = self.categories.remove(position);

        let now = Utc::now();
        for child in self
            .categories
            .iter_mut()
            .filter(|category| category.parent_id.as_ref() == Some(id))
        {
            child.parent_id = None;
            child.updated_at = Some(now);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sets_timestamps_and_rejects_duplicates() {
        let mut store = InMemoryCategoryStore::new();
        let stored = store.insert(Category::new("A", "Books")).unwrap();
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);

        let err = store.insert(Category::new("A", "Again")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("A".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut store = InMemoryCategoryStore::new();
        let stored = store.insert(Category::new("A", "Books")).unwrap();
        let mut renamed = stored.clone();
        renamed.name = "Comics".to_string();
        renamed.created_at = None;
        let updated = store.update(renamed).unwrap();
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(store.get(&"A".into()).unwrap().unwrap().name, "Comics");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = InMemoryCategoryStore::new();
        let err = store.update(Category::new("Z", "Ghost")).unwrap_err();
        assert_eq!(err, StoreError::NotFound("Z".into()));
    }

    #[test]
    fn test_delete_detaches_children() {
        let mut store = InMemoryCategoryStore::with_categories(vec![
            Category::new("A", "Books"),
            Category::new("B", "Novels").with_parent("A"),
            Category::new("C", "Crime").with_parent("B"),
        ]);
        store.delete(&"A".into()).unwrap();
        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining[0].parent_id.is_none());
        assert_eq!(remaining[1].parent_id, Some("B".into()));
    }
}
