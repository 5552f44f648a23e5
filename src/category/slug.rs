//! Slug derivation for category names

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derive a slug from a display name
///
/// Trims, lowercases and collapses each run of whitespace into a single `-`.
/// Other characters are kept as they are.
///
/// ```
/// use catalog_hierarchy::category::slugify;
/// assert_eq!(slugify("  Men's  Shoes "), "men's-shoes");
/// ```
pub fn slugify(name: &str) -> String {
    WHITESPACE.replace_all(name.trim(), "-").to_lowercase()
}

/// Whether an explicitly supplied slug is already in derived form
///
/// Non-empty, lowercase, no whitespace: exactly what [`slugify`] leaves
/// unchanged.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
