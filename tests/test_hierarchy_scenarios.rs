//! End-to-end scenarios for the hierarchy engine

use catalog_hierarchy::hierarchy::walk;
use catalog_hierarchy::{
    available_parents, build_hierarchy, flatten_hierarchy, validate_reparent, Category,
    CategoryHierarchyNode, CategoryId, InvalidParentReason,
};

fn ids(nodes: &[CategoryHierarchyNode]) -> Vec<&str> {
    walk(nodes).map(|node| node.id().as_str()).collect()
}

fn chain() -> Vec<Category> {
    vec![
        Category::new("A", "A"),
        Category::new("B", "B").with_parent("A"),
        Category::new("C", "C").with_parent("B"),
    ]
}

#[test]
fn test_three_level_build() {
    let roots = build_hierarchy(&chain());
    assert_eq!(roots.len(), 1);

    let a = &roots[0];
    assert_eq!(a.id(), &CategoryId::from("A"));
    assert_eq!(a.level, 0);
    assert!(a.path.is_empty());
    assert!(a.has_children);

    let b = &a.children[0];
    assert_eq!(b.id(), &CategoryId::from("B"));
    assert_eq!(b.level, 1);
    assert_eq!(b.path, vec!["A"]);
    assert!(b.has_children);

    let c = &b.children[0];
    assert_eq!(c.id(), &CategoryId::from("C"));
    assert_eq!(c.level, 2);
    assert_eq!(c.path, vec!["A", "B"]);
    assert!(!c.has_children);
    assert!(c.children.is_empty());
}

#[test]
fn test_input_order_does_not_matter() {
    let mut reversed = chain();
    reversed.reverse();
    assert_eq!(ids(&build_hierarchy(&reversed)), vec!["A", "B", "C"]);
}

#[test]
fn test_sibling_ordering() {
    let categories = vec![
        Category::new("A", "Parent"),
        Category::new("x", "Two").with_parent("A").with_sort_order(2),
        Category::new("y", "Zero").with_parent("A").with_sort_order(0),
        Category::new("z", "One").with_parent("A").with_sort_order(1),
    ];
    let roots = build_hierarchy(&categories);
    let orders: Vec<i32> = roots[0]
        .children
        .iter()
        .map(|node| node.category.sort_order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_sibling_ties_keep_collection_order() {
    let categories = vec![
        Category::new("r2", "Second").with_sort_order(1),
        Category::new("r1", "First").with_sort_order(1),
        Category::new("r0", "Zeroth").with_sort_order(0),
    ];
    assert_eq!(ids(&build_hierarchy(&categories)), vec!["r0", "r2", "r1"]);
}

#[test]
fn test_dangling_parent_becomes_root() {
    let categories = vec![
        Category::new("A", "Shoes"),
        Category::new("B", "Sneakers").with_parent("deleted-category"),
    ];
    let roots = build_hierarchy(&categories);
    assert_eq!(ids(&roots), vec!["A", "B"]);
    assert_eq!(roots[1].level, 0);
    assert!(roots[1].path.is_empty());
    assert_eq!(
        roots[1].category.parent_id,
        Some(CategoryId::from("deleted-category"))
    );
}

#[test]
fn test_reparent_rejection() {
    let err = validate_reparent(&"A".into(), Some(&"C".into()), &chain()).unwrap_err();
    assert_eq!(err.reason, InvalidParentReason::Descendant);
}

#[test]
fn test_available_parents_excludes_subtree() {
    let mut categories = chain();
    categories.push(Category::new("D", "D"));

    let editing_a = available_parents(Some(&"A".into()), &categories);
    assert_eq!(ids(&editing_a), vec!["D"]);

    let editing_d = available_parents(Some(&"D".into()), &categories);
    assert_eq!(ids(&editing_d), vec!["A", "B", "C"]);

    let editing_b = available_parents(Some(&"B".into()), &categories);
    assert_eq!(ids(&editing_b), vec!["A", "D"]);
}

#[test]
fn test_flatten_rows_for_tree_table() {
    let mut categories = chain();
    categories.push(Category::new("D", "D"));
    let rows = flatten_hierarchy(&build_hierarchy(&categories));
    let shape: Vec<(&str, usize, bool)> = rows
        .iter()
        .map(|row| (row.id.as_str(), row.level, row.has_children))
        .collect();
    assert_eq!(
        shape,
        vec![("A", 0, true), ("B", 1, true), ("C", 2, false), ("D", 0, false)]
    );
}

#[test]
fn test_node_serializes_with_camel_case_fields() {
    let roots = build_hierarchy(&chain());
    let json = serde_json::to_value(&roots[0]).unwrap();
    assert_eq!(json["id"], "A");
    assert_eq!(json["level"], 0);
    assert_eq!(json["hasChildren"], true);
    assert_eq!(json["children"][0]["parentId"], "A");
    assert_eq!(json["children"][0]["children"][0]["path"][1], "B");
}

#[test]
fn test_deep_chain_builds_and_prunes() {
    const DEPTH: usize = 200;
    let categories: Vec<Category> = (0..DEPTH)
        .map(|i| {
            let category = Category::new(format!("n{}", i), format!("Level {}", i));
            if i == 0 {
                category
            } else {
                category.with_parent(format!("n{}", i - 1))
            }
        })
        .collect();

    let roots = build_hierarchy(&categories);
    let deepest = walk(&roots).last().unwrap();
    assert_eq!(deepest.level, DEPTH - 1);
    assert_eq!(deepest.path.len(), DEPTH - 1);
    assert_eq!(deepest.path[0], "Level 0");

    let parents = available_parents(Some(&CategoryId::from("n100")), &categories);
    let remaining: Vec<&CategoryHierarchyNode> = walk(&parents).collect();
    assert_eq!(remaining.len(), 100);
    assert!(!remaining[99].has_children);
}
