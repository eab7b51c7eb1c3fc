use super::{FieldSpec, FormKind, InputKind, StepForm};
use crate::signup::step::StepPayload;
use crate::signup::validation::{self, ValidationReport};

/// Closed set of shop categories, in dropdown order.
pub const SHOP_CATEGORIES: &[&str] = &[
    "supermarket",
    "hypermarket",
    "grocery",
    "bakery",
    "cafe",
    "other",
];

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("category", InputKind::Dropdown(SHOP_CATEGORIES)),
    FieldSpec::new("location", InputKind::Text),
    FieldSpec::new("workingHours", InputKind::Text),
];

/// Step 3, shop only.
pub struct ShopCategoryForm;

impl StepForm for ShopCategoryForm {
    fn kind(&self) -> FormKind {
        FormKind::ShopCategory
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self, payload: &StepPayload) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(
            "category",
            validation::one_of(payload.value("category"), SHOP_CATEGORIES),
        );
        report.check(
            "location",
            validation::required_length(payload.value("location"), 3, 200),
        );
        report.check(
            "workingHours",
            validation::required_length(payload.value("workingHours"), 1, 100),
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::validation::FieldError;

    fn payload_with(category: &str) -> StepPayload {
        StepPayload::new()
            .with("category", category)
            .with("location", "Maadi, Cairo")
            .with("workingHours", "09:00-22:00")
    }

    #[test]
    fn every_listed_category_is_accepted() {
        for category in SHOP_CATEGORIES {
            assert!(
                ShopCategoryForm.validate(&payload_with(category)).is_valid(),
                "{category} should be accepted"
            );
        }
    }

    #[test]
    fn category_outside_closed_set_is_rejected() {
        for category in ["restaurant", "Bakery", "pharmacy"] {
            let report = ShopCategoryForm.validate(&payload_with(category));
            assert_eq!(report.error("category"), Some(&FieldError::InvalidOption));
        }
    }

    #[test]
    fn category_field_is_a_custom_dropdown() {
        let spec = ShopCategoryForm.fields()[0];
        assert_eq!(spec.input, InputKind::Dropdown(SHOP_CATEGORIES));
        assert_eq!(
            spec.option_key("shopCategory", "cafe"),
            "signup.shopCategory.category.options.cafe"
        );
    }
}
