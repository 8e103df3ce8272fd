//! Payload assembly.
//!
//! Turns validated raw fields, the parsed environment and the routing
//! configuration into a [`Payload`].
//!
//! # Build Flow
//!
//! ```text
//! RawFields + Category + ParsedEnvironment + &RoutingConfig
//!        │
//!        ▼
//! ┌─────────────────────────────────┐
//! │ 1. Category precondition        │
//! │    - Other needs a detail       │
//! ├─────────────────────────────────┤
//! │ 2. Sections                     │
//! │    - contact (confirm? omitted) │
//! │    - issue                      │
//! │    - optional details by        │
//! │      category                   │
//! ├─────────────────────────────────┤
//! │ 3. Snapshot routing + summary   │
//! └─────────────────────────────────┘
//!        │
//!        ▼
//! Payload (no reference yet) ── finalize() ──▶ Payload (reference, route_taken)
//! ```
use crate::config::RoutingConfig;
use crate::error::IntakeError;
use crate::reference::Reference;
use crate::routing::RouteAnnotation;
use crate::types::{
    AccountDetails, Category, Contact, Field, IssueDetails, OptionalDetails, ParsedEnvironment,
    Payload, PaymentDetails, RawFields,
};
use crate::validate::check_required_for;

/// Summary fallback when the task field is blank.
pub const DEFAULT_TASK: &str = "Support request";

/// Builds the canonical payload for one submission.
///
/// The caller is expected to have run [`validate`](crate::validate) first.
/// `category` alone decides which optional section is present; values typed
/// into fields of other sections are dropped.
///
/// # Errors
///
/// [`IntakeError::MissingOtherDetail`] when `category` is
/// [`Category::Other`] and the `otherService` field is blank.
///
/// ```rust
/// use intake::{build, parse_environment, Category, EnvironmentDescriptor, Field, RawFields, RoutingConfig};
///
/// let fields = RawFields::new()
///     .with(Field::Email, "a@b.com")
///     .with(Field::Task, "Pay a parking ticket")
///     .with(Field::OrderNumber, "A-1001");
/// let env = parse_environment(&EnvironmentDescriptor::new("Chrome/118", "https://example.org"));
///
/// let payload = build(&fields, &Category::Payment, env, &RoutingConfig::default()).unwrap();
/// assert_eq!(payload.summary, "[Payment / Checkout / Cart] Pay a parking ticket");
/// assert_eq!(payload.payment().map(|p| p.order_number.as_str()), Some("A-1001"));
/// assert!(payload.reference.is_none());
/// ```
pub fn build(
    fields: &RawFields,
    category: &Category,
    parsed_env: ParsedEnvironment,
    config: &RoutingConfig,
) -> Result<Payload, IntakeError> {
    // A reserved label passed as a plain service must still select its section.
    let category = &Category::from_label(category.label());
    check_required_for(category, fields)?;

    let details = optional_details(fields, category);
    let summary = summary_line(category, fields.get(Field::Task));

    Ok(Payload {
        route: config.primary_route,
        fallback_enabled: config.email_fallback_enabled,
        contact: contact(fields),
        category: category.clone(),
        issue: IssueDetails {
            task: fields.get(Field::Task).to_string(),
            description: fields.get(Field::Issue).to_string(),
            error: fields.get(Field::Error).to_string(),
            timestamp: fields.get(Field::Timestamp).to_string(),
        },
        technical_context: parsed_env,
        details,
        summary,
        reference: None,
        route_taken: None,
    })
}

/// `"[{category}] {task}"`, with [`DEFAULT_TASK`] standing in for an empty task.
pub fn summary_line(category: &Category, task: &str) -> String {
    let task = if task.is_empty() { DEFAULT_TASK } else { task };
    format!("[{category}] {task}")
}

fn contact(fields: &RawFields) -> Contact {
    Contact {
        full_name: fields.get(Field::FullName).to_string(),
        email: fields.get(Field::Email).to_string(),
        phone: fields.get(Field::Phone).to_string(),
        confirm_email: Some(fields.get(Field::ConfirmEmail))
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    }
}

fn optional_details(fields: &RawFields, category: &Category) -> OptionalDetails {
    match category {
        Category::Payment => OptionalDetails::Payment(PaymentDetails {
            order_number: fields.get(Field::OrderNumber).to_string(),
            card_last4: fields.get(Field::CardLast4).to_string(),
            provider: fields.get(Field::PaymentProvider).to_string(),
        }),
        Category::Account => OptionalDetails::Account(AccountDetails {
            username: fields.get(Field::Username).to_string(),
            account_id: fields.get(Field::AccountId).to_string(),
        }),
        Category::Other => {
            OptionalDetails::Other(fields.get(Field::OtherService).to_string())
        }
        Category::Service(_) => OptionalDetails::None,
    }
}

impl Payload {
    /// Returns the finalized payload carrying `reference` and the routing
    /// annotation (`route_taken`, `fallback_enabled`).
    ///
    /// Consumes the built payload. `route` stays the value snapshotted at
    /// build time.
    pub fn finalize(self, annotation: RouteAnnotation, reference: Reference) -> Payload {
        Payload {
            route_taken: Some(annotation.route),
            fallback_enabled: annotation.fallback_enabled,
            reference: Some(reference),
            ..self
        }
    }
}
