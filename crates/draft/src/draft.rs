//! The in-progress product record and its validated form.

use intake_core::{FieldId, ValidationErrors};
use intake_media::ImageBlob;
use serde::Serialize;

use crate::category::Category;
use crate::schema;

/// The form's working record, mutated one field at a time as the user types.
///
/// Fields hold raw user input throughout: `category` is the select value as
/// entered and `price` whatever the number input parsed to. Nothing is judged
/// until [`ProductDraft::validate`] runs at submit time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image: Option<ImageBlob>,
}

impl ProductDraft {
    /// A fresh, untouched draft: empty strings, zero price, no image.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a submit would pass validation right now.
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Runs every schema rule and, when all pass, parses the raw fields into
    /// a [`ValidProduct`]. Pure; the draft itself is untouched.
    pub fn validate(&self) -> Result<ValidProduct, ValidationErrors> {
        schema::product_schema().validate(self)?;
        // The schema vouched for membership; re-parsing keeps this total.
        let category = self.category.parse::<Category>().map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.record(FieldId::Category, schema::unknown_category_message());
            errors
        })?;
        Ok(ValidProduct {
            name: self.name.clone(),
            price: self.price,
            category,
            description: self.description.clone(),
            image: self.image.clone(),
        })
    }
}

/// A product record that passed every validation rule.
///
/// Fields are private; [`ProductDraft::validate`] is the only constructor.
#[derive(Debug, Clone)]
pub struct ValidProduct {
    name: String,
    price: f64,
    category: Category,
    description: String,
    image: Option<ImageBlob>,
}

impl ValidProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> Option<&ImageBlob> {
        self.image.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        CATEGORY_MISSING, DESCRIPTION_TOO_SHORT, IMAGE_TOO_LARGE, NAME_TOO_SHORT,
        PRICE_NOT_POSITIVE, unknown_category_message,
    };

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".to_string(),
            price: 49.99,
            category: "home".to_string(),
            description: "Adjustable LED desk lamp with a warm glow".to_string(),
            image: None,
        }
    }

    fn blob_of_size(size_bytes: u64) -> ImageBlob {
        let mut blob = ImageBlob::from_bytes("photo.png", Vec::new());
        blob.size_bytes = size_bytes;
        blob
    }

    #[test]
    fn empty_draft_fails_on_four_fields() {
        let errors = ProductDraft::empty().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.message(FieldId::Name), Some(NAME_TOO_SHORT));
        assert_eq!(errors.message(FieldId::Price), Some(PRICE_NOT_POSITIVE));
        assert_eq!(errors.message(FieldId::Category), Some(CATEGORY_MISSING));
        assert_eq!(
            errors.message(FieldId::Description),
            Some(DESCRIPTION_TOO_SHORT)
        );
        assert!(!errors.contains(FieldId::Image));
    }

    #[test]
    fn valid_draft_parses_into_a_valid_product() {
        let draft = valid_draft();
        let product = draft.validate().unwrap();
        assert_eq!(product.name(), "Desk Lamp");
        assert_eq!(product.price(), 49.99);
        assert_eq!(product.category(), Category::Home);
        assert_eq!(product.description(), draft.description);
        assert!(product.image().is_none());
        assert!(draft.is_submittable());
    }

    #[test]
    fn name_boundary_is_three_characters() {
        let mut draft = valid_draft();
        draft.name = "ab".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.message(FieldId::Name), Some(NAME_TOO_SHORT));

        draft.name = "abc".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut draft = valid_draft();
        draft.name = "日本語".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn price_must_be_strictly_positive() {
        for price in [0.0, -49.99, f64::NAN] {
            let mut draft = valid_draft();
            draft.price = price;
            let errors = draft.validate().unwrap_err();
            assert_eq!(errors.message(FieldId::Price), Some(PRICE_NOT_POSITIVE));
        }
    }

    #[test]
    fn empty_category_asks_for_a_selection() {
        let mut draft = valid_draft();
        draft.category = String::new();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.message(FieldId::Category), Some(CATEGORY_MISSING));
    }

    #[test]
    fn unknown_category_lists_the_allowed_set() {
        let mut draft = valid_draft();
        draft.category = "toys".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.message(FieldId::Category).unwrap(),
            "Category must be one of: electronics, clothing, books, home"
        );
        assert_eq!(
            errors.message(FieldId::Category),
            Some(unknown_category_message().as_str())
        );
    }

    #[test]
    fn description_boundary_is_ten_characters() {
        let mut draft = valid_draft();
        draft.description = "123456789".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.message(FieldId::Description),
            Some(DESCRIPTION_TOO_SHORT)
        );

        draft.description = "1234567890".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn image_is_validated_against_the_size_cap() {
        let mut draft = valid_draft();
        draft.image = Some(blob_of_size(5_000_001));
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(FieldId::Image), Some(IMAGE_TOO_LARGE));

        draft.image = Some(blob_of_size(5_000_000));
        let product = draft.validate().unwrap();
        assert_eq!(product.image().unwrap().size_bytes, 5_000_000);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_category() -> impl Strategy<Value = Category> {
            (0usize..Category::ALL.len()).prop_map(|i| Category::ALL[i])
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: every well-formed draft validates, and the parsed
            /// product echoes the draft's fields.
            #[test]
            fn well_formed_drafts_always_validate(
                name in "[A-Za-z0-9 ]{3,40}",
                price in 0.01f64..10_000.0,
                category in any_category(),
                description in "[A-Za-z0-9 ,.]{10,120}",
            ) {
                let draft = ProductDraft {
                    name: name.clone(),
                    price,
                    category: category.as_str().to_string(),
                    description: description.clone(),
                    image: None,
                };
                let product = draft.validate().unwrap();
                prop_assert_eq!(product.name(), name.as_str());
                prop_assert_eq!(product.price(), price);
                prop_assert_eq!(product.category(), category);
                prop_assert_eq!(product.description(), description.as_str());
            }

            /// Property: names under three characters always fail with the
            /// name message, whatever the rest of the draft looks like.
            #[test]
            fn short_names_always_fail(
                name in "[A-Za-z ]{0,2}",
                price in -100.0f64..100.0,
            ) {
                let mut draft = valid_draft();
                draft.name = name;
                draft.price = price;
                let errors = draft.validate().unwrap_err();
                prop_assert_eq!(errors.message(FieldId::Name), Some(NAME_TOO_SHORT));
            }

            /// Property: prices at or below zero always fail.
            #[test]
            fn non_positive_prices_always_fail(price in -10_000.0f64..=0.0) {
                let mut draft = valid_draft();
                draft.price = price;
                let errors = draft.validate().unwrap_err();
                prop_assert_eq!(errors.message(FieldId::Price), Some(PRICE_NOT_POSITIVE));
            }

            /// Property: validation is deterministic.
            #[test]
            fn validation_is_deterministic(
                name in "[A-Za-z0-9 ]{0,10}",
                description in "[A-Za-z0-9 ]{0,20}",
            ) {
                let mut draft = valid_draft();
                draft.name = name;
                draft.description = description;
                let first = draft.validate().map(|_| ());
                let second = draft.validate().map(|_| ());
                prop_assert_eq!(first, second);
            }
        }
    }
}
