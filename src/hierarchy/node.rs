//! Derived tree view of a category

use crate::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};

/// Computed, read-only view of a [`Category`] placed in the tree
///
/// Never persisted; only consistent with the snapshot it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHierarchyNode {
    #[serde(flatten)]
    pub category: Category,
    /// Depth from root (root = 0)
    pub level: usize,
    pub has_children: bool,
    /// Ancestor names, root first, excluding this node
    pub path: Vec<String>,
    pub children: Vec<CategoryHierarchyNode>,
}

impl CategoryHierarchyNode {
    pub fn id(&self) -> &CategoryId {
        &self.category.id
    }

    pub fn name(&self) -> &str {
        &self.category.name
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Depth-first, pre-order walk over this node and everything below it
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree
pub struct NodeIter<'a> {
    stack: Vec<&'a CategoryHierarchyNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a CategoryHierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order walk over a whole forest
pub fn walk(nodes: &[CategoryHierarchyNode]) -> impl Iterator<Item = &CategoryHierarchyNode> {
    nodes.iter().flat_map(CategoryHierarchyNode::iter)
}

/// Find a node anywhere in a forest
pub fn find_node<'a>(
    nodes: &'a [CategoryHierarchyNode],
    id: &CategoryId,
) -> Option<&'a CategoryHierarchyNode> {
    walk(nodes).find(|node| node.id() == id)
}

/// One row of an indented tree table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyRow {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub level: usize,
    pub has_children: bool,
    pub is_active: bool,
    pub path: Vec<String>,
}

impl From<&CategoryHierarchyNode> for HierarchyRow {
    fn from(node: &CategoryHierarchyNode) -> Self {
        Self {
            id: node.category.id.clone(),
            name: node.category.name.clone(),
            slug: node.category.slug.clone(),
            level: node.level,
            has_children: node.has_children,
            is_active: node.category.is_active,
            path: node.path.clone(),
        }
    }
}

/// Flatten a forest into pre-order rows, the shape tree tables render
pub fn flatten_hierarchy(nodes: &[CategoryHierarchyNode]) -> Vec<HierarchyRow> {
    walk(nodes).map(HierarchyRow::from).collect()
}
