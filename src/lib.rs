//! Workspace umbrella crate for the eSupport help-desk intake.
//!
//! This crate stitches the intake core together with file-based
//! configuration so callers can go from a config file and a form submission
//! to a finalized payload with a single call.

pub mod config;

pub use intake::{
    ACCOUNT_LABEL, AccountDetails, Category, ConfigError, Contact, DEFAULT_TASK, Device,
    EnvironmentDescriptor, Field, FieldVisibility, IntakeError, IssueDetails, OTHER_DETAIL_MAX_CHARS,
    OTHER_LABEL, OptionalDetails, PAYMENT_LABEL, ParsedEnvironment, Payload, PaymentDetails,
    PrimaryRoute, RawFields, Reference, RouteAnnotation, RoutingConfig, RoutingDecision,
    StatusMessage, SubmissionOutcome, UNKNOWN, build, check_required_for, describe_routing,
    generate_reference, other_detail_counter, parse_environment, report, routing_notice, submit,
    submit_with_reference, validate,
};

pub use crate::config::{ConfigLoadError, EsupportConfig, LoggingYamlConfig, RoutingYamlConfig};

/// Runs one submission with the routing section of a loaded configuration.
pub fn submit_with_config(
    fields: &RawFields,
    descriptor: &EnvironmentDescriptor,
    cfg: &EsupportConfig,
) -> Result<SubmissionOutcome, IntakeError> {
    submit(fields, descriptor, &cfg.routing_config())
}

/// `fields` with the technical inputs filled from the classified environment,
/// the way the form pre-fills them before submission.
pub fn hydrated_fields(mut fields: RawFields, descriptor: &EnvironmentDescriptor) -> RawFields {
    fields.hydrate_technical(&parse_environment(descriptor));
    fields
}

/// What the form should show for the category currently selected in `fields`.
pub fn visibility_for(fields: &RawFields) -> FieldVisibility {
    FieldVisibility::for_category(&fields.category())
}
