//! Text rendering for hierarchies

use catalog_hierarchy::{CategoryHierarchyNode, HierarchyRow};
use colored::Colorize;
use std::fmt::Write;

/// Draw a forest with box-drawing guides
///
/// ```text
/// Electronics (electronics)
/// ├── Computers (computers)
/// │   └── Laptops (laptops)
/// └── Audio (audio)
/// ```
pub fn render_tree(nodes: &[CategoryHierarchyNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&label(node));
        out.push('\n');
        render_children(&node.children, "", &mut out);
    }
    out
}

fn render_children(children: &[CategoryHierarchyNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, guide) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        let _ = writeln!(out, "{}{}{}", prefix, branch, label(child));
        render_children(&child.children, &format!("{}{}", prefix, guide), out);
    }
}

fn label(node: &CategoryHierarchyNode) -> String {
    let category = &node.category;
    let slug = format!("({})", category.slug).dimmed();
    if category.is_active {
        format!("{} {}", category.name.bold(), slug)
    } else {
        format!("{} {} {}", category.name.dimmed(), slug, "[inactive]".yellow())
    }
}

/// Indented table: one row per category, id first
pub fn render_rows(rows: &[HierarchyRow]) -> String {
    let width = rows.iter().map(|row| row.id.as_str().len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let marker = if row.has_children { "+" } else { "-" };
        let _ = writeln!(
            out,
            "{:<width$}  {}{} {}",
            row.id.as_str(),
            "  ".repeat(row.level),
            marker,
            row.name,
            width = width
        );
    }
    out
}

/// Breadcrumb, root first
pub fn render_path<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(" > ")
}
