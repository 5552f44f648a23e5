//! # catalog-hierarchy
//!
//! Category hierarchy engine for an e-commerce catalog: turns a flat snapshot
//! of categories (each with an optional parent) into an ordered tree, answers
//! ancestor/descendant queries and refuses reparents that would create cycles.
//!
//! The engine in [`hierarchy`] is pure and synchronous. [`store`] holds the
//! caller-owned pieces around it: the CRUD store seam, the snapshot cache and
//! a service that validates every parent change before writing.
//!
//! ```
//! use catalog_hierarchy::{build_hierarchy, validate_reparent, Category};
//!
//! let categories = vec![
//!     Category::new("A", "Electronics"),
//!     Category::new("B", "Computers").with_parent("A"),
//!     Category::new("C", "Laptops").with_parent("B"),
//! ];
//!
//! let roots = build_hierarchy(&categories);
//! assert_eq!(roots[0].children[0].children[0].level, 2);
//! assert!(validate_reparent(&"A".into(), Some(&"C".into()), &categories).is_err());
//! ```

pub mod category;
pub mod config;
pub mod hierarchy;
pub mod seed;
pub mod store;

pub use category::{Category, CategoryDraft, CategoryError, CategoryId};
pub use config::HierarchyConfig;
pub use hierarchy::{
    ancestor_ids, available_parents, build_hierarchy, build_hierarchy_with, category_path,
    descendant_ids, find_node, flatten_hierarchy, validate_reparent, CategoryHierarchyNode,
    CategoryIndex, HierarchyError, HierarchyOptions, HierarchyRow, InvalidParentError,
    InvalidParentPolicy, InvalidParentReason,
};
pub use store::{
    CategoryCache, CategoryService, CategoryStore, InMemoryCategoryStore, ServiceError, StoreError,
};
