//! Multi-pass category seeding
//!
//! Bulk loads arrive in explicit passes (roots, then sub-levels, then
//! sub-sub-levels). Each pass may only name parents created by an earlier pass
//! or already present in the store, so every intermediate state is a valid,
//! partial collection.

use crate::category::{CategoryDraft, CategoryId};
use crate::store::{CategoryService, CategoryStore, ServiceError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A whole seed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPlan {
    #[serde(default, rename = "pass")]
    pub passes: Vec<SeedPass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPass {
    /// Label for reports, e.g. "roots"
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "category")]
    pub categories: Vec<SeedCategory>,
}

/// One category to seed; `parent` is a category *name*
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedCategory {
    pub name: String,
    pub parent: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl SeedCategory {
    fn draft(&self, parent_id: Option<CategoryId>) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            parent_id,
            image: self.image.clone(),
            is_active: self.is_active,
            sort_order: self.sort_order,
        }
    }
}

/// Ids created, per pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub passes: Vec<SeedPassReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedPassReport {
    pub name: Option<String>,
    pub created: Vec<CategoryId>,
}

impl SeedReport {
    pub fn created_count(&self) -> usize {
        self.passes.iter().map(|pass| pass.created.len()).sum()
    }
}

#[derive(Debug)]
pub enum SeedError {
    /// `parent` names no category from an earlier pass or the store
    UnknownParent {
        pass: usize,
        category: String,
        parent: String,
    },
    /// Creating a category failed
    Service(ServiceError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::UnknownParent {
                pass,
                category,
                parent,
            } => write!(
                f,
                "Seed pass {}: category '{}' names unknown parent '{}'\n\
                 Suggestion: seed the parent in an earlier pass",
                pass + 1,
                category,
                parent
            ),
            SeedError::Service(e) => write!(f, "Seeding failed: {}", e),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<ServiceError> for SeedError {
    fn from(error: ServiceError) -> Self {
        SeedError::Service(error)
    }
}

/// Run `plan` pass by pass against `service`
///
/// Stops at the first failure; categories created by earlier steps stay.
pub fn seed<S: CategoryStore>(
    service: &mut CategoryService<S>,
    plan: &SeedPlan,
) -> Result<SeedReport, SeedError> {
    let mut known: HashMap<String, CategoryId> = HashMap::new();
    for category in service.categories()? {
        known
            .entry(category.name.clone())
            .or_insert_with(|| category.id.clone());
    }

    let mut report = SeedReport::default();
    for (pass_number, pass) in plan.passes.iter().enumerate() {
        let mut created_names = Vec::with_capacity(pass.categories.len());
        let mut pass_report = SeedPassReport {
            name: pass.name.clone(),
            created: Vec::with_capacity(pass.categories.len()),
        };

        for entry in &pass.categories {
            let parent_id = match &entry.parent {
                Some(parent) => Some(known.get(parent).cloned().ok_or_else(|| {
                    SeedError::UnknownParent {
                        pass: pass_number,
                        category: entry.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            let created = service.create(entry.draft(parent_id))?;
            created_names.push((created.name.clone(), created.id.clone()));
            pass_report.created.push(created.id);
        }

        log::info!(
            "Seed pass {} ({}): created {} categories",
            pass_number + 1,
            pass.name.as_deref().unwrap_or("unnamed"),
            pass_report.created.len()
        );
        for (name, id) in created_names {
            known.entry(name).or_insert(id);
        }
        report.passes.push(pass_report);
    }

    Ok(report)
}
