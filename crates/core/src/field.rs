//! Field identity for the product intake form.

use serde::{Deserialize, Serialize};

/// The five fields of the product intake form.
///
/// The declaration order is the on-screen field order;
/// [`ValidationErrors`](crate::validate::ValidationErrors) iterates in this
/// order so error surfaces render deterministically.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Price,
    Category,
    Description,
    Image,
}

impl FieldId {
    /// All fields, in form order.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Price,
        FieldId::Category,
        FieldId::Description,
        FieldId::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Price => "price",
            FieldId::Category => "category",
            FieldId::Description => "description",
            FieldId::Image => "image",
        }
    }
}

impl core::fmt::Display for FieldId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
