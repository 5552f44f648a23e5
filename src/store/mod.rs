//! Persistence and client-cache collaborators
//!
//! The engine in [`crate::hierarchy`] is stateless. State lives here, owned by
//! the calling layer:
//! - [`CategoryStore`]: the CRUD client seam to the relational store
//! - [`CategoryCache`]: last fetched snapshot plus selection, invalidated on
//!   every mutation
//! - [`CategoryService`]: validated writes and hierarchy reads over both

mod cache;
mod error;
mod memory;
mod service;

pub use cache::CategoryCache;
pub use error::{ServiceError, StoreError};
pub use memory::InMemoryCategoryStore;
pub use service::CategoryService;

use crate::category::{Category, CategoryId};

/// CRUD access to category records
///
/// Implementations own timestamps: `insert` sets `created_at` and
/// `updated_at`, `update` refreshes `updated_at`.
pub trait CategoryStore {
    /// Every record, in insertion order
    fn list(&self) -> Result<Vec<Category>, StoreError>;

    fn get(&self, id: &CategoryId) -> Result<Option<Category>, StoreError>;

    /// # Errors
    ///
    /// `StoreError::DuplicateId` when the id is taken.
    fn insert(&mut self, category: Category) -> Result<Category, StoreError>;

    /// # Errors
    ///
    /// `StoreError::NotFound` when no record has this id.
    fn update(&mut self, category: Category) -> Result<Category, StoreError>;

    /// Remove a record and detach its direct children to root
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no record has this id.
    fn delete(&mut self, id: &CategoryId) -> Result<Category, StoreError>;
}
