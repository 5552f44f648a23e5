//! Snapshot index: arena, id lookup and parent adjacency list
//!
//! All traversal in the engine works on positions into the arena and on
//! [`CategoryId`] keys, never on links between records.

use crate::category::{Category, CategoryId};
use std::collections::{HashMap, HashSet};

/// Read-only index over one snapshot of categories
///
/// Built once per snapshot; borrows the snapshot and never mutates it.
#[derive(Debug)]
pub struct CategoryIndex<'a> {
    /// Unique records in collection order
    arena: Vec<&'a Category>,
    /// id -> arena position
    positions: HashMap<&'a CategoryId, usize>,
    /// declared parent id -> child positions, in collection order
    children: HashMap<&'a CategoryId, Vec<usize>>,
}

impl<'a> CategoryIndex<'a> {
    /// Index a snapshot.
    ///
    /// Ids are expected to be unique. When they are not, the first record
    /// wins and later duplicates are left out of the index.
    pub fn new(categories: &'a [Category]) -> Self {
        let mut arena = Vec::with_capacity(categories.len());
        let mut positions = HashMap::with_capacity(categories.len());

        for category in categories {
            if positions.contains_key(&category.id) {
                log::warn!(
                    "Duplicate category id '{}' ignored (name: '{}')",
                    category.id,
                    category.name
                );
                continue;
            }
            positions.insert(&category.id, arena.len());
            arena.push(category);
        }

        let mut children: HashMap<&'a CategoryId, Vec<usize>> = HashMap::new();
        for (position, category) in arena.iter().copied().enumerate() {
            if let Some(parent_id) = &category.parent_id {
                children.entry(parent_id).or_default().push(position);
            }
        }

        Self {
            arena,
            positions,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn get(&self, id: &CategoryId) -> Option<&'a Category> {
        self.positions.get(id).map(|&position| self.arena[position])
    }

    pub(crate) fn position(&self, id: &CategoryId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub(crate) fn at(&self, position: usize) -> &'a Category {
        self.arena[position]
    }

    /// Records in collection order (duplicates excluded)
    pub fn categories(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.arena.iter().copied()
    }

    /// Positions of the records whose declared parent is `id`
    ///
    /// A self-parented record shows up in its own list; callers that descend
    /// through this list must guard against it.
    pub(crate) fn child_positions(&self, id: &CategoryId) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Arena position of the parent a record effectively hangs under
    ///
    /// `None` for records without a parent, with a dangling parent, or
    /// parented to themselves.
    pub(crate) fn parent_position(&self, position: usize) -> Option<usize> {
        let category = self.arena[position];
        category
            .parent_id
            .as_ref()
            .and_then(|parent_id| self.position(parent_id))
            .filter(|&parent| parent != position)
    }

    /// Whether `category` declares a parent that is not in this snapshot
    pub fn is_dangling(&self, category: &Category) -> bool {
        category
            .parent_id
            .as_ref()
            .is_some_and(|parent_id| !self.contains(parent_id))
    }

    /// Records whose declared parent does not exist in this snapshot
    pub fn dangling(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.categories()
            .filter(move |category| self.is_dangling(category))
    }

    /// Records parented to themselves
    pub fn self_parented(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.categories()
            .filter(|category| category.parent_id.as_ref() == Some(&category.id))
    }

    /// Walk `parent_id` links upward from `id`, root first, `id` included
    ///
    /// Stops at a missing parent and at the first id seen twice, returning
    /// what was collected so far. Unknown `id` yields an empty path.
    pub fn path(&self, id: &CategoryId) -> Vec<&'a Category> {
        let mut path = Vec::new();
        let mut visited: HashSet<&CategoryId> = HashSet::new();
        let mut current = self.get(id);

        while let Some(category) = current {
            if !visited.insert(&category.id) {
                if category.parent_id.as_ref() != Some(&category.id) {
                    log::warn!("Parent cycle detected at category '{}'", category.id);
                }
                break;
            }
            path.push(category);
            current = category.parent_id.as_ref().and_then(|parent_id| self.get(parent_id));
        }

        path.reverse();
        path
    }

    /// Every id on [`Self::path`] except `id` itself
    pub fn ancestor_ids(&self, id: &CategoryId) -> HashSet<CategoryId> {
        self.path(id)
            .into_iter()
            .filter(|category| &category.id != id)
            .map(|category| category.id.clone())
            .collect()
    }

    /// Every id whose ancestor chain passes through `id`, `id` excluded
    ///
    /// Downward counterpart of [`Self::path`], guarded by a visited set.
    pub fn descendant_ids(&self, id: &CategoryId) -> HashSet<CategoryId> {
        let mut descendants = HashSet::new();
        let mut visited: HashSet<&CategoryId> = HashSet::new();
        visited.insert(id);
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for &child in self.child_positions(current) {
                let child_id = &self.arena[child].id;
                if visited.insert(child_id) {
                    descendants.insert(child_id.clone());
                    stack.push(child_id);
                }
            }
        }

        descendants
    }

    /// Whether `ancestor` appears on the path of `id`
    pub fn is_ancestor(&self, ancestor: &CategoryId, id: &CategoryId) -> bool {
        ancestor != id && self.path(id).iter().any(|category| &category.id == ancestor)
    }
}
