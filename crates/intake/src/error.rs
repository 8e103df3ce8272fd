//! Error types produced by the intake crate.
//!
//! Only one error is meant for the person filling in the form:
//! [`EmailMismatch`](IntakeError::EmailMismatch). The other variant marks a
//! precondition the shell was supposed to enforce before submitting; it is
//! returned rather than panicking so the shell can surface it.
//!
//! | Error | Raised by | Audience |
//! |-------|-----------|----------|
//! | [`EmailMismatch`](IntakeError::EmailMismatch) | [`validate`](crate::validate) | user |
//! | [`MissingOtherDetail`](IntakeError::MissingOtherDetail) | [`build`](crate::build) | shell |
//!
//! ```rust
//! use intake::IntakeError;
//!
//! fn alert_text(error: &IntakeError) -> Option<String> {
//!     error.is_user_facing().then(|| error.to_string())
//! }
//!
//! assert_eq!(
//!     alert_text(&IntakeError::EmailMismatch).as_deref(),
//!     Some("Email addresses do not match.")
//! );
//! assert!(alert_text(&IntakeError::MissingOtherDetail).is_none());
//! ```
use thiserror::Error;

/// Errors that abort a submission before a payload exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntakeError {
    /// Confirmation email is filled in and differs from the primary email
    /// (both compared after trimming).
    #[error("Email addresses do not match.")]
    EmailMismatch,

    /// Category is `Other` but the free-text service detail is blank.
    #[error("a description of the service is required when the category is Other")]
    MissingOtherDetail,
}

impl IntakeError {
    /// True for errors that should be shown to the requester as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, IntakeError::EmailMismatch)
    }

    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::EmailMismatch => "email_mismatch",
            IntakeError::MissingOtherDetail => "missing_other_detail",
        }
    }
}
