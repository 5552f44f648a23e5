//! Category hierarchy engine
//!
//! Pure, synchronous functions over a snapshot of [`Category`] records:
//! - [`build_hierarchy`]: flat snapshot to ordered forest
//! - [`category_path`] / [`ancestor_ids`]: upward walks
//! - [`validate_reparent`]: cycle check before a `parent_id` write
//! - [`available_parents`]: parent choices for an edit form
//!
//! Structurally invalid input (dangling, self or cyclic parents) degrades to
//! extra roots instead of failing, unless a strict build is requested.
//!
//! [`Category`]: crate::category::Category

mod build;
mod error;
mod index;
mod node;
mod path;
mod reparent;

pub use build::{build_hierarchy, build_hierarchy_with, check_parents, HierarchyOptions, InvalidParentPolicy};
pub use error::{HierarchyError, InvalidParentError, InvalidParentReason};
pub use index::CategoryIndex;
pub use node::{find_node, flatten_hierarchy, walk, CategoryHierarchyNode, HierarchyRow, NodeIter};
pub use path::{ancestor_ids, category_path, descendant_ids, is_ancestor};
pub use reparent::{available_parents, validate_reparent};
