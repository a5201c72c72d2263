//! Category model
//!
//! Categories only attribute expenses and incomes for breakdowns; they carry
//! no behaviour of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Display name of the bucket for events without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A spending or income category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl Category {
    /// Create a new category without icon or color
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: String::new(),
            color: String::new(),
        }
    }

    /// Set the display icon and color
    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries").with_style("🛒", "#22c55e");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color, "#22c55e");
        assert_eq!(category.to_string(), "🛒 Groceries");
    }

    #[test]
    fn test_validation() {
        assert!(Category::new("Rent").validate().is_ok());
        assert_eq!(
            Category::new("").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            Category::new("x".repeat(51)).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }
}
