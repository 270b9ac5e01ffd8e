//! `intake-draft` — the in-progress product record and its validation rules.
//!
//! [`ProductDraft`] is what the form edits field by field. [`ProductDraft::validate`]
//! runs the declarative [`schema`] and, when every rule passes, parses the raw
//! draft into a [`ValidProduct`]. Validation is the only way one is produced.

pub mod category;
pub mod draft;
pub mod schema;

pub use category::{Category, UnknownCategory};
pub use draft::{ProductDraft, ValidProduct};
pub use schema::product_schema;
