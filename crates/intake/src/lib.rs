//! eSupport Intake Layer
//!
//! This is where a support request enters the help-desk flow. We take the raw
//! form fields plus a description of the requester's browser, check them, and
//! hand back a canonical payload and the message to show the requester.
//! Delivering the payload (ticketing API, email) happens elsewhere.
//!
//! ## What we do here
//!
//! - **Classify the environment** - browser, OS and device class from the
//!   user-agent string, best effort, never failing
//! - **Validate** - email confirmation must match; `Other` needs a description
//! - **Build the payload** - one optional section chosen by category, routing
//!   snapshotted from config
//! - **Route and reference** - static route annotation plus an `ESUP-` code
//! - **Report** - the success message for the route that was configured
//! - **Log** - structured tracing events, without personal data
//!
//! ## Main entry point
//!
//! Call [`submit`] with [`RawFields`], an [`EnvironmentDescriptor`] and a
//! [`RoutingConfig`]; get back a [`SubmissionOutcome`] or an [`IntakeError`].
//!
//! ## Example
//!
//! ```
//! use intake::{submit, EnvironmentDescriptor, Field, RawFields, RoutingConfig};
//!
//! let fields = RawFields::new()
//!     .with(Field::Email, "a@b.com")
//!     .with(Field::ConfirmEmail, "a@b.com")
//!     .with(Field::Service, "Other")
//!     .with(Field::OtherService, "Login button missing");
//! let descriptor = EnvironmentDescriptor::new(
//!     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/118.0.0.0 Safari/537.36",
//!     "https://example.org/support",
//! );
//!
//! let outcome = submit(&fields, &descriptor, &RoutingConfig::default()).unwrap();
//!
//! assert_eq!(outcome.payload.other_detail(), Some("Login button missing"));
//! assert!(outcome.status.message.contains("We will create an incident"));
//! ```
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod environment;
mod error;
mod payload;
mod reference;
mod report;
mod routing;
mod types;
mod validate;
mod visibility;

pub use crate::config::{ConfigError, PrimaryRoute, RoutingConfig};
pub use crate::environment::{
    classify_browser, classify_device, classify_os, parse_environment, BrowserSignature,
    Normalization, OsSignature, BROWSER_SIGNATURES, DEVICE_KEYWORDS, OS_SIGNATURES, UNKNOWN,
};
pub use crate::error::IntakeError;
pub use crate::payload::{build, summary_line, DEFAULT_TASK};
pub use crate::reference::{
    generate_reference, generate_reference_with, Reference, REFERENCE_MAX, REFERENCE_MIN,
    REFERENCE_PREFIX,
};
pub use crate::report::{report, StatusMessage};
pub use crate::routing::{describe_routing, routing_notice, RouteAnnotation, RoutingDecision};
pub use crate::types::{
    AccountDetails, Category, Contact, Device, EnvironmentDescriptor, Field, IssueDetails,
    OptionalDetails, ParsedEnvironment, Payload, PaymentDetails, RawFields, ACCOUNT_LABEL,
    OTHER_LABEL, PAYMENT_LABEL,
};
pub use crate::validate::{check_required_for, validate};
pub use crate::visibility::{other_detail_counter, FieldVisibility, OTHER_DETAIL_MAX_CHARS};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Finalized payload, reference and route echo included.
    pub payload: Payload,
    pub routing: RoutingDecision,
    pub status: StatusMessage,
}

/// Runs one submission through the whole intake pipeline with a freshly drawn
/// reference.
pub fn submit(
    fields: &RawFields,
    descriptor: &EnvironmentDescriptor,
    config: &RoutingConfig,
) -> Result<SubmissionOutcome, IntakeError> {
    submit_with_reference(fields, descriptor, config, generate_reference())
}

/// Same as [`submit`] with a caller-chosen reference.
pub fn submit_with_reference(
    fields: &RawFields,
    descriptor: &EnvironmentDescriptor,
    config: &RoutingConfig,
    reference: Reference,
) -> Result<SubmissionOutcome, IntakeError> {
    let start = Instant::now();
    let category = fields.category();

    let span = tracing::span!(
        Level::INFO,
        "intake.submit",
        category = %category,
        route = %config.primary_route
    );
    let _guard = span.enter();

    match submit_inner(fields, &category, descriptor, config, reference) {
        Ok(outcome) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                reference = %outcome.payload.reference.as_ref().map(ToString::to_string).unwrap_or_default(),
                route_taken = %outcome.routing.annotation.route,
                fallback_enabled = outcome.routing.annotation.fallback_enabled,
                browser = %outcome.payload.technical_context.browser,
                device = %outcome.payload.technical_context.device,
                elapsed_micros,
                "intake_success"
            );
            Ok(outcome)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                error = %err,
                code = err.code(),
                user_facing = err.is_user_facing(),
                elapsed_micros,
                "intake_failure"
            );
            Err(err)
        }
    }
}

/// Validate, classify, build, annotate, report.
fn submit_inner(
    fields: &RawFields,
    category: &Category,
    descriptor: &EnvironmentDescriptor,
    config: &RoutingConfig,
    reference: Reference,
) -> Result<SubmissionOutcome, IntakeError> {
    // Nothing is built for an attempt that fails validation.
    validate(fields)?;

    let parsed_env = parse_environment(descriptor);
    let built = build(fields, category, parsed_env, config)?;

    let routing = describe_routing(config);
    let payload = built.finalize(routing.annotation, reference);
    let status = report(&payload, config);

    Ok(SubmissionOutcome {
        payload,
        routing,
        status,
    })
}
