//! The fixed category set offered by the form's select widget.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product category. The set is fixed; the raw select value is the
/// lowercase wire form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories, in the order the select widget lists them.
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Books => "books",
            Category::Home => "home",
        }
    }

    /// Human label the select widget shows for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home & Garden",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "books" => Ok(Category::Books),
            "home" => Ok(Category::Home),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_round_trips() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn labels_match_the_select_widget() {
        assert_eq!(Category::Electronics.label(), "Electronics");
        assert_eq!(Category::Home.label(), "Home & Garden");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "Books".parse::<Category>(),
            Err(UnknownCategory("Books".to_string()))
        );
    }

    #[test]
    fn serializes_to_the_wire_form() {
        assert_eq!(serde_json::to_string(&Category::Home).unwrap(), "\"home\"");
        let parsed: Category = serde_json::from_str("\"clothing\"").unwrap();
        assert_eq!(parsed, Category::Clothing);
    }
}
