//! Reparent validation and parent selection
//!
//! Two defences against cycles: [`available_parents`] narrows the choices a
//! form offers, [`validate_reparent`] is the authoritative check run before
//! any write.

use super::{build_hierarchy, CategoryHierarchyNode, CategoryIndex, InvalidParentError, InvalidParentReason};
use crate::category::{Category, CategoryId};
use std::collections::HashSet;

impl CategoryIndex<'_> {
    /// Check that `category_id` may be moved under `new_parent_id`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParentError`] when the new parent is the category
    /// itself or one of its descendants.
    pub fn validate_reparent(
        &self,
        category_id: &CategoryId,
        new_parent_id: Option<&CategoryId>,
    ) -> Result<(), InvalidParentError> {
        let Some(new_parent_id) = new_parent_id else {
            return Ok(());
        };

        let reason = if new_parent_id == category_id {
            InvalidParentReason::SelfParent
        } else if self.descendant_ids(category_id).contains(new_parent_id) {
            InvalidParentReason::Descendant
        } else {
            return Ok(());
        };

        log::debug!(
            "Rejected reparent of '{}' under '{}': {:?}",
            category_id,
            new_parent_id,
            reason
        );
        Err(InvalidParentError {
            category_id: category_id.clone(),
            parent_id: new_parent_id.clone(),
            reason,
        })
    }

    /// `id` together with all of its descendants
    pub fn subtree_ids(&self, id: &CategoryId) -> HashSet<CategoryId> {
        let mut ids = self.descendant_ids(id);
        ids.insert(id.clone());
        ids
    }
}

/// Check a proposed `parent_id` change against a snapshot
///
/// Moving to root (`None`) is always valid. Pure: nothing is written.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(all_categories), fields(categories = all_categories.len()))
)]
pub fn validate_reparent(
    category_id: &CategoryId,
    new_parent_id: Option<&CategoryId>,
    all_categories: &[Category],
) -> Result<(), InvalidParentError> {
    CategoryIndex::new(all_categories).validate_reparent(category_id, new_parent_id)
}

/// The hierarchy with `exclude_category_id` and its subtree removed
///
/// `has_children` is recomputed on the pruned view. With no exclusion the
/// full hierarchy is returned.
pub fn available_parents(
    exclude_category_id: Option<&CategoryId>,
    all_categories: &[Category],
) -> Vec<CategoryHierarchyNode> {
    let hierarchy = build_hierarchy(all_categories);
    match exclude_category_id {
        Some(exclude) => {
            let excluded = CategoryIndex::new(all_categories).subtree_ids(exclude);
            prune(hierarchy, &excluded)
        }
        None => hierarchy,
    }
}

// One recursion per level, like the builder
fn prune(nodes: Vec<CategoryHierarchyNode>, excluded: &HashSet<CategoryId>) -> Vec<CategoryHierarchyNode> {
    nodes
        .into_iter()
        .filter(|node| !excluded.contains(node.id()))
        .map(|mut node| {
            node.children = prune(std::mem::take(&mut node.children), excluded);
            node.has_children = !node.children.is_empty();
            node
        })
        .collect()
}
