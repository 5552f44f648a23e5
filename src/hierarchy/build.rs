//! Tree builder
//!
//! Turns a flat snapshot into an ordered forest of [`CategoryHierarchyNode`]s:
//! - partition by parent id (the [`CategoryIndex`] adjacency list)
//! - pick roots: no parent, dangling parent, self parent, or the entry point
//!   of a parent cycle
//! - recurse from each root, sorting siblings by `sort_order` (stable on
//!   collection order) and annotating level, path and `has_children`

use super::{CategoryHierarchyNode, CategoryIndex, HierarchyError};
use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What to do with parent references that cannot be honoured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidParentPolicy {
    /// Treat the category as a root
    #[default]
    Promote,
    /// Fail the build with a [`HierarchyError`]
    Reject,
}

/// Build options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyOptions {
    pub invalid_parents: InvalidParentPolicy,
    /// When false, inactive categories are left out together with their subtrees
    pub include_inactive: bool,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            invalid_parents: InvalidParentPolicy::Promote,
            include_inactive: true,
        }
    }
}

impl HierarchyOptions {
    pub fn strict() -> Self {
        Self {
            invalid_parents: InvalidParentPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn active_only(mut self) -> Self {
        self.include_inactive = false;
        self
    }
}

/// Build the ordered root sequence of the hierarchy
///
/// Never fails: structurally invalid parent references turn the affected
/// categories into additional roots.
///
/// ```
/// use catalog_hierarchy::{build_hierarchy, Category};
///
/// let categories = vec![
///     Category::new("A", "Electronics"),
///     Category::new("B", "Laptops").with_parent("A"),
/// ];
/// let roots = build_hierarchy(&categories);
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].children[0].path, vec!["Electronics".to_string()]);
/// ```
pub fn build_hierarchy(categories: &[Category]) -> Vec<CategoryHierarchyNode> {
    let index = CategoryIndex::new(categories);
    build_from_index(&index, &HierarchyOptions::default())
}

/// Build the hierarchy with explicit options
///
/// # Errors
///
/// With [`InvalidParentPolicy::Reject`], returns the first dangling parent,
/// self parent or parent cycle found, in collection order.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(categories = categories.len()))
)]
pub fn build_hierarchy_with(
    categories: &[Category],
    options: &HierarchyOptions,
) -> Result<Vec<CategoryHierarchyNode>, HierarchyError> {
    let index = CategoryIndex::new(categories);
    if options.invalid_parents == InvalidParentPolicy::Reject {
        check_parents(&index)?;
    }
    Ok(build_from_index(&index, options))
}

/// Reject any parent reference the default build would have to repair
pub fn check_parents(index: &CategoryIndex<'_>) -> Result<(), HierarchyError> {
    for category in index.categories() {
        match &category.parent_id {
            Some(parent_id) if parent_id == &category.id => {
                return Err(HierarchyError::SelfParent(category.id.clone()));
            }
            Some(parent_id) if !index.contains(parent_id) => {
                return Err(HierarchyError::DanglingParent {
                    category_id: category.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
            _ => {}
        }
    }

    let roots = root_positions(index);
    if let Some(&cycle_entry) = roots
        .iter()
        .find(|&&position| index.parent_position(position).is_some())
    {
        return Err(HierarchyError::Cycle(index.at(cycle_entry).id.clone()));
    }
    Ok(())
}

pub(crate) fn build_from_index(
    index: &CategoryIndex<'_>,
    options: &HierarchyOptions,
) -> Vec<CategoryHierarchyNode> {
    let mut roots = root_positions(index);
    let root_set: HashSet<usize> = roots.iter().copied().collect();
    roots.retain(|&position| options.include_inactive || index.at(position).is_active);
    sort_siblings(index, &mut roots);

    let builder = TreeBuilder {
        index,
        root_set: &root_set,
        include_inactive: options.include_inactive,
    };
    let mut placed: HashSet<usize> = roots.iter().copied().collect();
    let nodes: Vec<CategoryHierarchyNode> = roots
        .into_iter()
        .map(|position| builder.node(position, 0, Vec::new(), &mut placed))
        .collect();

    log::debug!(
        "Built category hierarchy: {} categories, {} roots, {} placed",
        index.len(),
        nodes.len(),
        placed.len()
    );
    nodes
}

/// Root positions, in collection order
///
/// Regular roots come first; each category left unreachable afterwards sits
/// on or under a parent cycle, and the first category of that cycle met while
/// walking upward from it is promoted.
fn root_positions(index: &CategoryIndex<'_>) -> Vec<usize> {
    let mut roots: Vec<usize> = (0..index.len())
        .filter(|&position| index.parent_position(position).is_none())
        .collect();

    for category in index.dangling() {
        log::warn!(
            "Category '{}' references missing parent '{}'; treating it as a root",
            category.id,
            category.parent_id.as_ref().map(|id| id.as_str()).unwrap_or_default()
        );
    }

    let mut reached = vec![false; index.len()];
    for &root in &roots {
        mark_subtree(index, root, &mut reached);
    }

    for position in 0..index.len() {
        if reached[position] {
            continue;
        }
        let entry = cycle_entry(index, position, &reached);
        log::warn!(
            "Category '{}' is part of a parent cycle; treating it as a root",
            index.at(entry).id
        );
        roots.push(entry);
        mark_subtree(index, entry, &mut reached);
    }

    roots
}

fn mark_subtree(index: &CategoryIndex<'_>, start: usize, reached: &mut [bool]) {
    if reached[start] {
        return;
    }
    reached[start] = true;
    let mut stack = vec![start];
    while let Some(position) = stack.pop() {
        for &child in index.child_positions(&index.at(position).id) {
            if !reached[child] {
                reached[child] = true;
                stack.push(child);
            }
        }
    }
}

/// Walk up from an unreachable position until a position repeats
fn cycle_entry(index: &CategoryIndex<'_>, start: usize, reached: &[bool]) -> usize {
    let mut seen = HashSet::new();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return current;
        }
        match index.parent_position(current) {
            Some(parent) if !reached[parent] => current = parent,
            _ => return current,
        }
    }
}

fn sort_siblings(index: &CategoryIndex<'_>, positions: &mut [usize]) {
    positions.sort_by_key(|&position| (index.at(position).sort_order, position));
}

/// Recursive node construction
///
/// Recurses once per level and copies the ancestor path into every node, so
/// depth is assumed to stay at catalog scale (tens of levels, not thousands).
struct TreeBuilder<'i, 'a> {
    index: &'i CategoryIndex<'a>,
    root_set: &'i HashSet<usize>,
    include_inactive: bool,
}

impl TreeBuilder<'_, '_> {
    fn node(
        &self,
        position: usize,
        level: usize,
        path: Vec<String>,
        placed: &mut HashSet<usize>,
    ) -> CategoryHierarchyNode {
        let category = self.index.at(position);

        let mut child_positions: Vec<usize> = self
            .index
            .child_positions(&category.id)
            .iter()
            .copied()
            .filter(|child| !self.root_set.contains(child))
            .filter(|&child| self.include_inactive || self.index.at(child).is_active)
            .collect();
        sort_siblings(self.index, &mut child_positions);
        child_positions.retain(|&child| placed.insert(child));

        let mut child_path = path.clone();
        child_path.push(category.name.clone());

        let children: Vec<CategoryHierarchyNode> = child_positions
            .into_iter()
            .map(|child| self.node(child, level + 1, child_path.clone(), placed))
            .collect();

        CategoryHierarchyNode {
            category: category.clone(),
            level,
            has_children: !children.is_empty(),
            path,
            children,
        }
    }
}
