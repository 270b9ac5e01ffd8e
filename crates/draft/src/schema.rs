//! The product validation schema.
//!
//! One rule per constraint, in form order. Messages are the exact strings the
//! form surfaces next to each field, so they live here as constants and the
//! rest of the workspace references them instead of re-typing them.

use intake_core::{FieldId, Schema};

use crate::category::Category;
use crate::draft::ProductDraft;

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MAX_IMAGE_BYTES: u64 = 5_000_000;

pub const NAME_TOO_SHORT: &str = "Product name must be at least 3 characters";
pub const PRICE_NOT_POSITIVE: &str = "Price must be a positive number";
pub const CATEGORY_MISSING: &str = "Please select a category";
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 10 characters";
pub const IMAGE_TOO_LARGE: &str = "Max image size is 5MB";

/// Message for a non-empty category value outside the fixed set.
pub fn unknown_category_message() -> String {
    let allowed = Category::ALL.map(|category| category.as_str());
    format!("Category must be one of: {}", allowed.join(", "))
}

/// Builds the full product schema. Every rule is pure; lengths count
/// characters, not bytes, and a NaN price fails the positivity rule.
pub fn product_schema() -> Schema<ProductDraft> {
    Schema::<ProductDraft>::new()
        .rule(FieldId::Name, |draft| {
            (draft.name.chars().count() < MIN_NAME_CHARS).then(|| NAME_TOO_SHORT.to_string())
        })
        .rule(FieldId::Price, |draft| {
            (!(draft.price > 0.0)).then(|| PRICE_NOT_POSITIVE.to_string())
        })
        .rule(FieldId::Category, |draft| {
            draft.category.is_empty().then(|| CATEGORY_MISSING.to_string())
        })
        .rule(FieldId::Category, |draft| {
            (!draft.category.is_empty() && draft.category.parse::<Category>().is_err())
                .then(unknown_category_message)
        })
        .rule(FieldId::Description, |draft| {
            (draft.description.chars().count() < MIN_DESCRIPTION_CHARS)
                .then(|| DESCRIPTION_TOO_SHORT.to_string())
        })
        .rule(FieldId::Image, |draft| {
            draft
                .image
                .as_ref()
                .is_some_and(|blob| blob.size_bytes > MAX_IMAGE_BYTES)
                .then(|| IMAGE_TOO_LARGE.to_string())
        })
}
