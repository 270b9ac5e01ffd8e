//! `intake-core` — foundation building blocks for the product intake form.
//!
//! This crate contains **pure form primitives** (no IO, no async): field
//! identity, the declarative validation combinators, and shared identifiers.

pub mod error;
pub mod field;
pub mod id;
pub mod validate;

pub use error::{CoreError, CoreResult};
pub use field::FieldId;
pub use id::AttemptId;
pub use validate::{FieldRule, Schema, ValidationErrors};
