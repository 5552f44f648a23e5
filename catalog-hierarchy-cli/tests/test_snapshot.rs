//! Tests for snapshot files and seeding through the store

use catalog_hierarchy::seed::{seed, SeedPlan};
use catalog_hierarchy::{build_hierarchy, flatten_hierarchy, CategoryService, InMemoryCategoryStore};
use catalog_hierarchy_cli::snapshot::{load_snapshot, save_snapshot, SnapshotError};
use std::fs;
use tempfile::TempDir;

const PLAN: &str = r#"
[[pass]]
name = "roots"

[[pass.category]]
name = "Electronics"

[[pass.category]]
name = "Garden"
is_active = false

[[pass]]
name = "sub-levels"

[[pass.category]]
name = "Computers"
parent = "Electronics"

[[pass.category]]
name = "Audio"
parent = "Electronics"
sort_order = 0

[[pass]]
name = "sub-sub-levels"

[[pass.category]]
name = "Laptops"
parent = "Computers"
"#;

#[test]
fn test_load_csv_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("categories.csv");
    fs::write(
        &path,
        "id,name,slug,parentId,isActive,sortOrder\n\
         1,Electronics,,,true,\n\
         2,Computers,,1,true,\n\
         3,Laptops,,2,false,\n",
    )
    .unwrap();

    let categories = load_snapshot(&path).unwrap();
    assert_eq!(categories.len(), 3);
    assert!(!categories[2].is_active);

    let rows = flatten_hierarchy(&build_hierarchy(&categories));
    let levels: Vec<usize> = rows.iter().map(|row| row.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
    assert_eq!(rows[2].path, vec!["Electronics", "Computers"]);
}

#[test]
fn test_save_then_load_keeps_tree() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("categories.json");

    let plan: SeedPlan = toml::from_str(PLAN).unwrap();
    let mut service = CategoryService::new(InMemoryCategoryStore::new());
    let report = seed(&mut service, &plan).unwrap();
    assert_eq!(report.created_count(), 5);
    assert_eq!(report.passes[1].name.as_deref(), Some("sub-levels"));

    save_snapshot(&path, service.store().as_slice()).unwrap();
    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded, service.store().as_slice());

    let roots = build_hierarchy(&loaded);
    let names: Vec<&str> = roots.iter().map(|node| node.name()).collect();
    assert_eq!(names, vec!["Electronics", "Garden"]);
    // Audio has an explicit sort order of 0, Computers its insertion position
    let children: Vec<&str> = roots[0].children.iter().map(|node| node.name()).collect();
    assert_eq!(children, vec!["Audio", "Computers"]);
    assert_eq!(roots[0].children[1].children[0].name(), "Laptops");
    assert_eq!(roots[0].children[1].children[0].level, 2);
}

#[test]
fn test_missing_snapshot_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_snapshot(&temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("categories.yaml");
    fs::write(&path, "[]").unwrap();
    assert!(matches!(
        load_snapshot(&path),
        Err(SnapshotError::UnsupportedFormat(_))
    ));
}
