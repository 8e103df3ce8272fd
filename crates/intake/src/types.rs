//! Core data model types for the intake crate.
//!
//! These types represent the raw form submission handed over by the shell and
//! the canonical payload that leaves the intake stage.
//!
//! # Type Hierarchy
//!
//! ```text
//! RawFields (key -> value, from the shell)      EnvironmentDescriptor
//! ├── fullName, email, confirmEmail, phone      ├── user_agent
//! ├── service, otherService                     ├── page_url
//! ├── task, issue, error, timestamp             └── referrer: Option
//! ├── orderNumber, cardLast4, paymentProvider          │
//! └── username, accountId                              ▼ parse_environment()
//!                                               ParsedEnvironment
//!         ↓ payload::build()                    ├── browser, os
//!                                               ├── device: Device
//! Payload                                       └── page_url, referrer
//! ├── route, fallback_enabled (config snapshot)
//! ├── contact: Contact
//! ├── category: Category
//! ├── issue: IssueDetails
//! ├── technical_context: ParsedEnvironment
//! ├── details: OptionalDetails
//! │   ├── Payment(PaymentDetails)
//! │   ├── Account(AccountDetails)
//! │   ├── Other(String)
//! │   └── None
//! ├── summary
//! └── reference, route_taken (set by Payload::finalize)
//! ```
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::config::PrimaryRoute;
use crate::reference::Reference;

/// Label of the payment category as shown in the service selector.
pub const PAYMENT_LABEL: &str = "Payment / Checkout / Cart";
/// Label of the account category as shown in the service selector.
pub const ACCOUNT_LABEL: &str = "Account / Login / Registration";
/// Label of the free-text category.
pub const OTHER_LABEL: &str = "Other";

/// Named form fields the shell hands over.
///
/// The set is fixed; [`Field::key`] gives the wire name used in [`RawFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    ConfirmEmail,
    Phone,
    Service,
    OtherService,
    Task,
    Issue,
    Error,
    Timestamp,
    OrderNumber,
    CardLast4,
    PaymentProvider,
    Username,
    AccountId,
    Browser,
    Os,
    Device,
    PageUrl,
    Referrer,
}

impl Field {
    /// Fields filled from [`ParsedEnvironment`] rather than typed by the user.
    pub const TECHNICAL: [Field; 5] = [
        Field::Browser,
        Field::Os,
        Field::Device,
        Field::PageUrl,
        Field::Referrer,
    ];

    /// Wire name of the field.
    pub const fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::ConfirmEmail => "confirmEmail",
            Field::Phone => "phone",
            Field::Service => "service",
            Field::OtherService => "otherService",
            Field::Task => "task",
            Field::Issue => "issue",
            Field::Error => "error",
            Field::Timestamp => "timestamp",
            Field::OrderNumber => "orderNumber",
            Field::CardLast4 => "cardLast4",
            Field::PaymentProvider => "paymentProvider",
            Field::Username => "username",
            Field::AccountId => "accountId",
            Field::Browser => "browser",
            Field::Os => "os",
            Field::Device => "device",
            Field::PageUrl => "pageUrl",
            Field::Referrer => "referrer",
        }
    }
}

/// Raw field values of one submission attempt.
///
/// Absent keys read as the empty string, the same way an untouched form
/// control would. Deserializes from a flat JSON object.
///
/// ```rust
/// use intake::{Field, RawFields};
///
/// let fields = RawFields::new()
///     .with(Field::Email, "a@b.com")
///     .with(Field::Service, "Other");
/// assert_eq!(fields.get(Field::Email), "a@b.com");
/// assert_eq!(fields.get(Field::Phone), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.0.insert(field.key().to_string(), value.into());
    }

    /// Value of `field`, or `""` when the shell did not supply it.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(field.key()).map(String::as_str).unwrap_or("")
    }

    /// Value of `field` when it is non-empty after trimming.
    pub fn non_empty(&self, field: Field) -> Option<&str> {
        let value = self.get(field);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// The category currently selected in the service field.
    pub fn category(&self) -> Category {
        Category::from_label(self.get(Field::Service))
    }

    /// Writes the parsed environment into the technical fields, replacing
    /// whatever the shell had there.
    pub fn hydrate_technical(&mut self, env: &ParsedEnvironment) {
        for field in Field::TECHNICAL {
            if let Some(value) = env.field_value(field) {
                self.insert(field, value);
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Service classification selected by the user.
///
/// Three labels select an optional field group; every other label is carried
/// verbatim in [`Category::Service`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// `Payment / Checkout / Cart`
    Payment,
    /// `Account / Login / Registration`
    Account,
    /// `Other`, requires a free-text detail.
    Other,
    /// Any other service label.
    Service(String),
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            PAYMENT_LABEL => Category::Payment,
            ACCOUNT_LABEL => Category::Account,
            OTHER_LABEL => Category::Other,
            other => Category::Service(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Payment => PAYMENT_LABEL,
            Category::Account => ACCOUNT_LABEL,
            Category::Other => OTHER_LABEL,
            Category::Service(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

/// Client environment as reported by the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    /// Self-reported environment signature (a user-agent string).
    pub user_agent: String,
    pub page_url: String,
    #[serde(default)]
    pub referrer: Option<String>,
}

impl EnvironmentDescriptor {
    pub fn new(user_agent: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            page_url: page_url.into(),
            referrer: None,
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// Coarse device class derived from the environment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Tablet => "Tablet",
            Device::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic fields derived from an [`EnvironmentDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEnvironment {
    /// `"{name} {version}"`, `"{name}"`, or `"Unknown"`.
    pub browser: String,
    pub os: String,
    pub device: Device,
    pub page_url: String,
    pub referrer: String,
}

impl ParsedEnvironment {
    /// Value backing one of the [`Field::TECHNICAL`] fields; `None` for any
    /// other field.
    pub fn field_value(&self, field: Field) -> Option<String> {
        match field {
            Field::Browser => Some(self.browser.clone()),
            Field::Os => Some(self.os.clone()),
            Field::Device => Some(self.device.to_string()),
            Field::PageUrl => Some(self.page_url.clone()),
            Field::Referrer => Some(self.referrer.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    pub task: String,
    pub description: String,
    pub error: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub order_number: String,
    pub card_last4: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub username: String,
    pub account_id: String,
}

/// The category-specific section of a payload.
///
/// Exactly one variant exists per payload, so payment and account details can
/// never appear together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalDetails {
    Payment(PaymentDetails),
    Account(AccountDetails),
    /// Free-text description of an unlisted service. Never empty.
    Other(String),
    None,
}

/// Canonical support request.
///
/// Built by [`build`](crate::build) and finalized by [`Payload::finalize`];
/// neither step mutates an existing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Primary route snapshotted from the configuration at build time.
    pub route: PrimaryRoute,
    pub fallback_enabled: bool,
    pub contact: Contact,
    pub category: Category,
    pub issue: IssueDetails,
    pub technical_context: ParsedEnvironment,
    pub details: OptionalDetails,
    pub summary: String,
    pub reference: Option<Reference>,
    pub route_taken: Option<PrimaryRoute>,
}

impl Payload {
    /// Free-text detail, present only for [`Category::Other`].
    pub fn other_detail(&self) -> Option<&str> {
        match &self.details {
            OptionalDetails::Other(text) => Some(text),
            _ => None,
        }
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        match &self.details {
            OptionalDetails::Payment(details) => Some(details),
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&AccountDetails> {
        match &self.details {
            OptionalDetails::Account(details) => Some(details),
            _ => None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.reference.is_some()
    }

    /// Pretty-printed JSON in the wire schema.
    pub fn to_json_pretty(&self) -> String {
        // Cannot fail: every leaf is a string, bool or unit enum.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadWire<'a> {
    route: PrimaryRoute,
    fallback_enabled: bool,
    contact: &'a Contact,
    service: ServiceWire<'a>,
    issue: &'a IssueDetails,
    technical_context: &'a ParsedEnvironment,
    optional_details: OptionalDetailsWire<'a>,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_taken: Option<PrimaryRoute>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceWire<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_detail: Option<&'a str>,
}

#[derive(Serialize)]
struct OptionalDetailsWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    payment: Option<&'a PaymentDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<&'a AccountDetails>,
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PayloadWire {
            route: self.route,
            fallback_enabled: self.fallback_enabled,
            contact: &self.contact,
            service: ServiceWire {
                name: self.category.label(),
                other_detail: self.other_detail(),
            },
            issue: &self.issue,
            technical_context: &self.technical_context,
            optional_details: OptionalDetailsWire {
                payment: self.payment(),
                account: self.account(),
            },
            summary: &self.summary,
            reference: self.reference.as_ref(),
            route_taken: self.route_taken,
        }
        .serialize(serializer)
    }
}
