//! Which optional field groups the form shows for a category.
//!
//! The answer is a pure function of the category, so the shell can re-run it
//! on every selection change and after a reset.
use serde::Serialize;

use crate::types::Category;

/// Upper bound the form puts on the `otherService` text, in UTF-16 code units.
pub const OTHER_DETAIL_MAX_CHARS: usize = 400;

/// Visibility of the conditional field groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVisibility {
    pub payment_fields: bool,
    pub account_fields: bool,
    pub other_service: bool,
    /// `otherService` must be filled in before submitting.
    pub other_service_required: bool,
}

impl FieldVisibility {
    pub fn for_category(category: &Category) -> Self {
        let is_other = matches!(category, Category::Other);
        Self {
            payment_fields: matches!(category, Category::Payment),
            account_fields: matches!(category, Category::Account),
            other_service: is_other,
            other_service_required: is_other,
        }
    }

    /// State after a form reset: nothing conditional is shown.
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Counter shown under the `otherService` box, e.g. `"19 / 400"`.
///
/// Counts UTF-16 code units, the unit the browser's `maxlength` enforces, so
/// a character outside the BMP counts as two.
pub fn other_detail_counter(text: &str) -> String {
    format!("{} / {OTHER_DETAIL_MAX_CHARS}", text.encode_utf16().count())
}
