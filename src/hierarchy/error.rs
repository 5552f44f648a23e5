//! Hierarchy error types

use crate::category::CategoryId;

/// Why a proposed parent was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidParentReason {
    /// The category was proposed as its own parent
    SelfParent,
    /// The proposed parent sits below the category
    Descendant,
}

/// A reparent that would create a cycle
///
/// The only case where the engine refuses to proceed. Callers must surface it
/// as a rejected write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParentError {
    pub category_id: CategoryId,
    pub parent_id: CategoryId,
    pub reason: InvalidParentReason,
}

impl std::fmt::Display for InvalidParentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = match self.reason {
            InvalidParentReason::SelfParent => "it is the category itself",
            InvalidParentReason::Descendant => "it is one of its descendants",
        };
        write!(
            f,
            "Cannot move a category under itself or one of its own descendants: \
             '{}' cannot be placed under '{}' ({})",
            self.category_id, self.parent_id, detail
        )
    }
}

impl std::error::Error for InvalidParentError {}

/// Errors from strict hierarchy builds
///
/// Only produced when [`super::InvalidParentPolicy::Reject`] is selected; the
/// default build degrades instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// `parent_id` references an id absent from the snapshot
    DanglingParent {
        category_id: CategoryId,
        parent_id: CategoryId,
    },
    /// `parent_id` equals the category's own id
    SelfParent(CategoryId),
    /// Parent links loop back on themselves through this category
    Cycle(CategoryId),
}

impl std::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HierarchyError::DanglingParent {
                category_id,
                parent_id,
            } => write!(
                f,
                "Category '{}' references parent '{}' which does not exist",
                category_id, parent_id
            ),
            HierarchyError::SelfParent(id) => {
                write!(f, "Category '{}' is its own parent", id)
            }
            HierarchyError::Cycle(id) => {
                write!(f, "Parent cycle detected through category '{}'", id)
            }
        }
    }
}

impl std::error::Error for HierarchyError {}
