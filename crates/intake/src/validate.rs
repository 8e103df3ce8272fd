//! Cross-field validation of a raw submission.
//!
//! Validation is first-fail and side-effect free. It runs before anything is
//! built; an error here means no payload exists for the attempt.
use crate::error::IntakeError;
use crate::types::{Category, Field, RawFields};

/// Checks the email confirmation.
///
/// A blank or absent confirmation is accepted. A filled-in confirmation must
/// equal the primary email once both are trimmed.
///
/// ```rust
/// use intake::{validate, Field, IntakeError, RawFields};
///
/// let ok = RawFields::new()
///     .with(Field::Email, "a@b.com")
///     .with(Field::ConfirmEmail, " a@b.com ");
/// assert!(validate(&ok).is_ok());
///
/// let mismatch = ok.with(Field::ConfirmEmail, "x@b.com");
/// assert_eq!(validate(&mismatch), Err(IntakeError::EmailMismatch));
/// ```
pub fn validate(fields: &RawFields) -> Result<(), IntakeError> {
    let confirm = fields.get(Field::ConfirmEmail).trim();
    if !confirm.is_empty() && confirm != fields.get(Field::Email).trim() {
        return Err(IntakeError::EmailMismatch);
    }
    Ok(())
}

/// Checks the field a category makes mandatory.
///
/// Only [`Category::Other`] has one: the free-text service detail must not be
/// blank. The form normally enforces this; [`build`](crate::build) calls it
/// again before assembling a payload.
pub fn check_required_for(category: &Category, fields: &RawFields) -> Result<(), IntakeError> {
    if matches!(category, Category::Other) && fields.non_empty(Field::OtherService).is_none() {
        return Err(IntakeError::MissingOtherDetail);
    }
    Ok(())
}
