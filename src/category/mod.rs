//! Category model
//!
//! The flat record owned by the persistence layer. The hierarchy engine only
//! ever reads snapshots of these values.

mod error;
mod slug;

pub use error::CategoryError;
pub use slug::{is_valid_slug, slugify};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque category identifier
///
/// Identifiers are compared by value only; nothing in this crate parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn default_true() -> bool {
    true
}

/// A node in the catalog classification tree, as stored
///
/// Deserializing expects a stored record: a missing or empty `slug` is
/// derived from the name, but a missing `sortOrder` reads as 0 because a
/// single record does not know its insertion position. Imports that need the
/// positional default go through [`CategoryDraft::into_category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCategory")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCategory {
    id: CategoryId,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parent_id: Option<CategoryId>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<StoredCategory> for Category {
    fn from(stored: StoredCategory) -> Self {
        let slug = match stored.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => slugify(&stored.name),
        };
        Self {
            id: stored.id,
            name: stored.name,
            slug,
            description: stored.description,
            parent_id: stored.parent_id,
            image: stored.image,
            is_active: stored.is_active,
            sort_order: stored.sort_order,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl Category {
    /// Build an active root category with a derived slug and `sort_order = 0`.
    ///
    /// Mostly useful for fixtures; production records come from
    /// [`CategoryDraft::into_category`].
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            description: None,
            parent_id: None,
            image: None,
            is_active: true,
            sort_order: 0,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// A category is a root when it declares no parent.
    ///
    /// This only looks at the record itself; whether a declared parent
    /// actually exists is a question for [`crate::hierarchy::CategoryIndex`].
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Create/update input for a category
///
/// Everything but `name` is optional; defaults are applied by
/// [`CategoryDraft::into_category`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent_id: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Check the draft without consuming it
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` for a blank name and
    /// `CategoryError::InvalidSlug` for an explicit slug that is not URL-safe.
    pub fn validate(&self) -> Result<(), CategoryError> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if let Some(slug) = &self.slug {
            if !is_valid_slug(slug) {
                return Err(CategoryError::InvalidSlug(slug.clone()));
            }
        }
        Ok(())
    }

    /// Turn the draft into a stored record
    ///
    /// `position` is the 0-based insertion position of the record and becomes
    /// its `sort_order` when none was supplied.
    pub fn into_category(self, id: CategoryId, position: usize) -> Result<Category, CategoryError> {
        self.validate()?;
        let name = self.name.trim().to_string();
        let slug = self.slug.unwrap_or_else(|| slugify(&name));
        let sort_order = match self.sort_order {
            Some(order) => order,
            None => i32::try_from(position).map_err(|_| CategoryError::SortOrderOverflow(position))?,
        };
        Ok(Category {
            id,
            name,
            slug,
            description: self.description,
            parent_id: self.parent_id,
            image: self.image,
            is_active: self.is_active.unwrap_or(true),
            sort_order,
            created_at: None,
            updated_at: None,
        })
    }

    /// Overwrite the editable fields of `category` with this draft.
    ///
    /// Fields left as `None` keep their current value, except `parent_id`,
    /// which is always taken from the draft (absent means "move to root").
    /// Without an explicit slug, a slug still derived from the old name
    /// follows a rename; a custom slug is kept.
    pub fn apply_to(self, category: &mut Category) -> Result<(), CategoryError> {
        self.validate()?;
        let name = self.name.trim().to_string();
        match self.slug {
            Some(slug) => category.slug = slug,
            None if category.slug == slugify(&category.name) => category.slug = slugify(&name),
            None => {}
        }
        category.name = name;
        if let Some(description) = self.description {
            category.description = Some(description);
        }
        if let Some(image) = self.image {
            category.image = Some(image);
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
        category.parent_id = self.parent_id;
        Ok(())
    }
}
