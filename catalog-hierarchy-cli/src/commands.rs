//! Command-line definition and subcommand handlers
//!
//! Handlers write their report to the given writer and return an error for
//! anything that should end the process with exit status 1, including a
//! rejected reparent.

use crate::render::{render_path, render_rows, render_tree};
use crate::snapshot::{load_snapshot, save_snapshot};
use anyhow::{bail, Context, Result};
use catalog_hierarchy::seed::{seed, SeedPlan};
use catalog_hierarchy::{
    ancestor_ids, available_parents, build_hierarchy_with, flatten_hierarchy, validate_reparent,
    Category, CategoryId, CategoryIndex, CategoryService, HierarchyConfig, HierarchyOptions,
    InMemoryCategoryStore, InvalidParentPolicy,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_ENV: &str = "CATALOG_HIERARCHY_SNAPSHOT";

#[derive(Debug, Parser)]
#[command(name = "catalog-hierarchy")]
#[command(about = "Inspect, validate and seed catalog category hierarchies")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Snapshot file (.json or .csv)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, default_value = catalog_hierarchy::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the category tree
    Tree {
        /// Leave out inactive categories and their subtrees
        #[arg(long)]
        active_only: bool,

        /// Fail on dangling, self or cyclic parent references
        #[arg(long)]
        strict: bool,
    },

    /// Print the tree as indented table rows
    Rows,

    /// Print the path from the root to a category
    Path {
        id: String,
    },

    /// List the ancestor ids of a category
    Ancestors {
        id: String,
    },

    /// Check whether a category may be moved under a new parent
    CheckReparent {
        id: String,

        /// New parent id (omit to move to root)
        #[arg(long)]
        parent: Option<String>,
    },

    /// List the parents a category may be moved under
    Parents {
        /// Category being edited
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Seed categories from a TOML plan
    Seed {
        /// Seed plan file
        #[arg(long)]
        plan: PathBuf,

        /// Output snapshot (default: the input snapshot)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Run one parsed command, writing its report to `out`
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = HierarchyConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    // Snapshot: flag, then env, then config
    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| std::env::var(SNAPSHOT_ENV).ok().map(PathBuf::from))
        .or_else(|| config.snapshot_path.clone().map(PathBuf::from));

    let json = cli.json;
    let load = || -> Result<Vec<Category>> {
        let path = snapshot_path.as_deref().context(
            "Snapshot not provided. Use --snapshot, set CATALOG_HIERARCHY_SNAPSHOT or snapshot_path in the config file.",
        )?;
        Ok(load_snapshot(path)?)
    };

    match cli.command {
        Commands::Tree { active_only, strict } => {
            let mut options = config.options();
            if active_only {
                options.include_inactive = false;
            }
            if strict {
                options.invalid_parents = InvalidParentPolicy::Reject;
            }
            handle_tree(&load()?, &options, json, out)
        }
        Commands::Rows => handle_rows(&load()?, &config.options(), json, out),
        Commands::Path { id } => handle_path(&load()?, &id.into(), json, out),
        Commands::Ancestors { id } => handle_ancestors(&load()?, &id.into(), json, out),
        Commands::CheckReparent { id, parent } => handle_check_reparent(
            &load()?,
            &id.into(),
            parent.map(CategoryId::from).as_ref(),
            cli.quiet,
            out,
        ),
        Commands::Parents { exclude } => handle_parents(
            &load()?,
            exclude.map(CategoryId::from).as_ref(),
            json,
            out,
        ),
        Commands::Seed { plan, out: target } => handle_seed(
            snapshot_path.as_deref(),
            &plan,
            target.as_deref(),
            cli.quiet,
            out,
        ),
    }
}

fn handle_tree(
    categories: &[Category],
    options: &HierarchyOptions,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let roots = build_hierarchy_with(categories, options)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&roots)?)?;
    } else if roots.is_empty() {
        writeln!(out, "No categories")?;
    } else {
        write!(out, "{}", render_tree(&roots))?;
    }
    Ok(())
}

fn handle_rows(
    categories: &[Category],
    options: &HierarchyOptions,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let rows = flatten_hierarchy(&build_hierarchy_with(categories, options)?);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(out, "{}", render_rows(&rows))?;
    }
    Ok(())
}

fn handle_path(categories: &[Category], id: &CategoryId, json: bool, out: &mut impl Write) -> Result<()> {
    let index = CategoryIndex::new(categories);
    if !index.contains(id) {
        bail!("Category not found: {}", id);
    }
    let path = index.path(id);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&path)?)?;
    } else {
        writeln!(out, "{}", render_path(path.iter().map(|category| category.name.as_str())))?;
    }
    Ok(())
}

fn handle_ancestors(
    categories: &[Category],
    id: &CategoryId,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if !CategoryIndex::new(categories).contains(id) {
        bail!("Category not found: {}", id);
    }
    let mut ancestors: Vec<CategoryId> = ancestor_ids(categories, id).into_iter().collect();
    ancestors.sort();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ancestors)?)?;
    } else {
        for ancestor in ancestors {
            writeln!(out, "{}", ancestor)?;
        }
    }
    Ok(())
}

fn handle_check_reparent(
    categories: &[Category],
    id: &CategoryId,
    parent: Option<&CategoryId>,
    quiet: bool,
    out: &mut impl Write,
) -> Result<()> {
    let index = CategoryIndex::new(categories);
    if !index.contains(id) {
        bail!("Category not found: {}", id);
    }
    if let Some(parent) = parent {
        if parent != id && !index.contains(parent) {
            bail!("Parent category not found: {}", parent);
        }
    }
    validate_reparent(id, parent, categories)?;
    if !quiet {
        let target = parent.map(CategoryId::as_str).unwrap_or("<root>");
        writeln!(out, "{} '{}' may be moved under '{}'", "OK".green().bold(), id, target)?;
    }
    Ok(())
}

fn handle_parents(
    categories: &[Category],
    exclude: Option<&CategoryId>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let rows = flatten_hierarchy(&available_parents(exclude, categories));
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(out, "{}", render_rows(&rows))?;
    }
    Ok(())
}

fn handle_seed(
    snapshot: Option<&Path>,
    plan_path: &Path,
    target: Option<&Path>,
    quiet: bool,
    out: &mut impl Write,
) -> Result<()> {
    let plan_text = fs::read_to_string(plan_path)
        .with_context(|| format!("reading seed plan {}", plan_path.display()))?;
    let plan: SeedPlan = toml::from_str(&plan_text)
        .with_context(|| format!("parsing seed plan {}", plan_path.display()))?;

    // Checked before seeding so a missing target writes nothing
    let target = target
        .or(snapshot)
        .context("No output file. Use --out or --snapshot.")?;

    let existing = match snapshot {
        Some(path) if path.exists() => load_snapshot(path)?,
        _ => Vec::new(),
    };
    let mut service = CategoryService::new(InMemoryCategoryStore::with_categories(existing));
    let report = seed(&mut service, &plan)?;
    save_snapshot(target, service.store().as_slice())?;

    if !quiet {
        for (i, pass) in report.passes.iter().enumerate() {
            writeln!(
                out,
                "  pass {} ({}): {} created",
                i + 1,
                pass.name.as_deref().unwrap_or("unnamed"),
                pass.created.len()
            )?;
        }
        writeln!(
            out,
            "{} Seeded {} categories into {}",
            "OK".green().bold(),
            report.created_count(),
            target.display()
        )?;
    }
    Ok(())
}
