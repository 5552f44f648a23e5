//! Store and service error types

use crate::category::{CategoryError, CategoryId};
use crate::hierarchy::{HierarchyError, InvalidParentError};

/// Errors from a [`super::CategoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id
    NotFound(CategoryId),
    /// A record with this id already exists
    DuplicateId(CategoryId),
    /// Backend failure
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Category not found: {}", id),
            StoreError::DuplicateId(id) => write!(f, "Category id already exists: {}", id),
            StoreError::Backend(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from [`super::CategoryService`]
#[derive(Debug)]
pub enum ServiceError {
    /// Draft failed validation
    Category(CategoryError),
    /// Write would create a parent cycle
    InvalidParent(InvalidParentError),
    /// Strict hierarchy build failed
    Hierarchy(HierarchyError),
    /// Persistence failure
    Store(StoreError),
    /// Target category does not exist
    NotFound(CategoryId),
    /// Proposed parent does not exist
    ParentNotFound(CategoryId),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Category(e) => write!(f, "Invalid category: {}", e),
            ServiceError::InvalidParent(e) => write!(f, "Invalid parent: {}", e),
            ServiceError::Hierarchy(e) => write!(f, "Invalid hierarchy: {}", e),
            ServiceError::Store(e) => write!(f, "{}", e),
            ServiceError::NotFound(id) => write!(f, "Category not found: {}", id),
            ServiceError::ParentNotFound(id) => write!(f, "Parent category not found: {}", id),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Category(e) => Some(e),
            ServiceError::InvalidParent(e) => Some(e),
            ServiceError::Hierarchy(e) => Some(e),
            ServiceError::Store(e) => Some(e),
            ServiceError::NotFound(_) | ServiceError::ParentNotFound(_) => None,
        }
    }
}

impl From<CategoryError> for ServiceError {
    fn from(error: CategoryError) -> Self {
        ServiceError::Category(error)
    }
}

impl From<InvalidParentError> for ServiceError {
    fn from(error: InvalidParentError) -> Self {
        ServiceError::InvalidParent(error)
    }
}

impl From<HierarchyError> for ServiceError {
    fn from(error: HierarchyError) -> Self {
        ServiceError::Hierarchy(error)
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        ServiceError::Store(error)
    }
}
