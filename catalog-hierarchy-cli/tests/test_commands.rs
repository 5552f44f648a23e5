//! Tests for the command handlers, run against snapshot files on disk

use catalog_hierarchy::{HierarchyError, InvalidParentError, InvalidParentReason};
use catalog_hierarchy_cli::commands::{run, Cli};
use catalog_hierarchy_cli::snapshot::load_snapshot;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"[
    {"id": "A", "name": "Electronics"},
    {"id": "B", "name": "Computers", "parentId": "A"},
    {"id": "C", "name": "Laptops", "parentId": "B"},
    {"id": "D", "name": "Garden"}
]"#;

const PLAN: &str = r#"
[[pass]]
name = "roots"

[[pass.category]]
name = "Toys"

[[pass]]
name = "sub-levels"

[[pass.category]]
name = "Puzzles"
parent = "Toys"
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("categories.json"), SNAPSHOT).unwrap();
        fs::write(dir.path().join("plan.toml"), PLAN).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run with an absent config file so the working directory never leaks in
    fn run(&self, args: &[&str]) -> (anyhow::Result<()>, String) {
        let config = self.path("absent.toml");
        let mut argv = vec!["catalog-hierarchy", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = run(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn run_on_snapshot(&self, args: &[&str]) -> (anyhow::Result<()>, String) {
        let snapshot = self.path("categories.json");
        let mut argv = args.to_vec();
        argv.extend_from_slice(&["--snapshot", snapshot.to_str().unwrap()]);
        self.run(&argv)
    }
}

fn invalid_parent(err: &anyhow::Error) -> &InvalidParentError {
    err.downcast_ref::<InvalidParentError>()
        .expect("expected an invalid parent error")
}

fn snapshot_names(path: &Path) -> Vec<String> {
    load_snapshot(path)
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect()
}

#[test]
fn test_tree_prints_every_category() {
    let fixture = Fixture::new();
    let (result, out) = fixture.run_on_snapshot(&["tree"]);
    result.unwrap();
    for name in ["Electronics", "Computers", "Laptops", "Garden"] {
        assert!(out.contains(name), "{} missing from:\n{}", name, out);
    }
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_strict_tree_fails_on_dangling_parent() {
    let fixture = Fixture::new();
    fs::write(
        fixture.path("dangling.json"),
        r#"[{"id": "A", "name": "Orphan", "parentId": "gone"}]"#,
    )
    .unwrap();
    let snapshot = fixture.path("dangling.json");

    let (result, _) = fixture.run(&["tree", "--snapshot", snapshot.to_str().unwrap()]);
    result.unwrap();

    let (result, _) = fixture.run(&["tree", "--strict", "--snapshot", snapshot.to_str().unwrap()]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HierarchyError>(),
        Some(HierarchyError::DanglingParent { .. })
    ));
}

#[test]
fn test_check_reparent_accepts_valid_move() {
    let fixture = Fixture::new();
    let (result, out) = fixture.run_on_snapshot(&["check-reparent", "C", "--parent", "D"]);
    result.unwrap();
    assert!(out.contains("'C' may be moved under 'D'"));

    let (result, out) = fixture.run_on_snapshot(&["check-reparent", "C"]);
    result.unwrap();
    assert!(out.contains("<root>"));
}

#[test]
fn test_check_reparent_rejects_descendant() {
    let fixture = Fixture::new();
    let (result, out) = fixture.run_on_snapshot(&["check-reparent", "A", "--parent", "C"]);
    let err = result.unwrap_err();
    assert_eq!(invalid_parent(&err).reason, InvalidParentReason::Descendant);
    assert!(err.to_string().contains("Cannot move a category under itself"));
    assert!(out.is_empty());
}

#[test]
fn test_check_reparent_rejects_self() {
    let fixture = Fixture::new();
    let (result, _) = fixture.run_on_snapshot(&["check-reparent", "B", "--parent", "B"]);
    let err = result.unwrap_err();
    assert_eq!(invalid_parent(&err).reason, InvalidParentReason::SelfParent);
}

#[test]
fn test_check_reparent_unknown_ids() {
    let fixture = Fixture::new();
    let (result, _) = fixture.run_on_snapshot(&["check-reparent", "C", "--parent", "Z"]);
    assert!(result.unwrap_err().to_string().contains("Parent category not found: Z"));

    let (result, _) = fixture.run_on_snapshot(&["check-reparent", "Z"]);
    assert!(result.unwrap_err().to_string().contains("Category not found: Z"));
}

#[test]
fn test_path_and_ancestors() {
    let fixture = Fixture::new();
    let (result, out) = fixture.run_on_snapshot(&["path", "C"]);
    result.unwrap();
    assert_eq!(out.trim(), "Electronics > Computers > Laptops");

    let (result, out) = fixture.run_on_snapshot(&["ancestors", "C"]);
    result.unwrap();
    assert_eq!(out.lines().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_path_and_ancestors_fail_on_unknown_id() {
    let fixture = Fixture::new();
    for command in ["path", "ancestors"] {
        let (result, out) = fixture.run_on_snapshot(&[command, "Z"]);
        assert!(
            result.unwrap_err().to_string().contains("Category not found: Z"),
            "{}",
            command
        );
        assert!(out.is_empty());
    }
}

#[test]
fn test_parents_json_excludes_subtree() {
    let fixture = Fixture::new();
    let (result, out) = fixture.run_on_snapshot(&["parents", "--exclude", "B", "--json"]);
    result.unwrap();
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["A", "D"]);
    assert_eq!(rows[0]["hasChildren"], false);
}

#[test]
fn test_seed_writes_back_to_snapshot() {
    let fixture = Fixture::new();
    let plan = fixture.path("plan.toml");
    let (result, out) = fixture.run_on_snapshot(&["seed", "--plan", plan.to_str().unwrap()]);
    result.unwrap();
    assert!(out.contains("Seeded 2 categories"));

    let names = snapshot_names(&fixture.path("categories.json"));
    assert_eq!(names.len(), 6);
    assert_eq!(&names[4..], &["Toys".to_string(), "Puzzles".to_string()]);
}

#[test]
fn test_seed_out_leaves_snapshot_untouched() {
    let fixture = Fixture::new();
    let plan = fixture.path("plan.toml");
    let target = fixture.path("seeded.json");
    let (result, _) = fixture.run_on_snapshot(&[
        "seed",
        "--plan",
        plan.to_str().unwrap(),
        "--out",
        target.to_str().unwrap(),
        "--quiet",
    ]);
    result.unwrap();

    assert_eq!(fs::read_to_string(fixture.path("categories.json")).unwrap(), SNAPSHOT);
    assert_eq!(snapshot_names(&target).len(), 6);
}

#[test]
fn test_seed_into_new_snapshot() {
    let fixture = Fixture::new();
    let plan = fixture.path("plan.toml");
    let fresh = fixture.path("fresh.json");
    let (result, _) = fixture.run(&[
        "seed",
        "--plan",
        plan.to_str().unwrap(),
        "--snapshot",
        fresh.to_str().unwrap(),
    ]);
    result.unwrap();
    assert_eq!(snapshot_names(&fresh), vec!["Toys", "Puzzles"]);
}

#[test]
fn test_seed_unknown_parent_writes_nothing() {
    let fixture = Fixture::new();
    let plan = fixture.path("bad_plan.toml");
    fs::write(
        &plan,
        "[[pass]]\n[[pass.category]]\nname = \"Dolls\"\nparent = \"Toys\"\n",
    )
    .unwrap();
    let target = fixture.path("seeded.json");
    let (result, _) = fixture.run_on_snapshot(&[
        "seed",
        "--plan",
        plan.to_str().unwrap(),
        "--out",
        target.to_str().unwrap(),
    ]);
    assert!(result.is_err());
    assert!(!target.exists());
}
