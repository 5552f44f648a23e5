//! Error types for category records

/// Errors raised while turning a draft into a category record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Name is empty or whitespace only
    EmptyName,
    /// Explicit slug contains uppercase or whitespace
    InvalidSlug(String),
    /// Insertion position does not fit a sort order
    SortOrderOverflow(usize),
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryError::EmptyName => write!(f, "Category name must not be empty"),
            CategoryError::InvalidSlug(slug) => write!(
                f,
                "Invalid slug '{}': use lowercase and no whitespace",
                slug
            ),
            CategoryError::SortOrderOverflow(position) => {
                write!(f, "Insertion position {} does not fit a sort order", position)
            }
        }
    }
}

impl std::error::Error for CategoryError {}
