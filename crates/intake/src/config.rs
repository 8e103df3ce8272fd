//! Routing configuration for the intake pipeline.
//!
//! [`RoutingConfig`] is constructed once at startup and passed by reference to
//! every pipeline call. Nothing in this crate mutates it; the parts a payload
//! depends on are copied into the payload when it is built, so a later
//! configuration change cannot alter a payload that already exists.
//!
//! ```rust
//! use intake::{PrimaryRoute, RoutingConfig};
//!
//! let config = RoutingConfig {
//!     primary_route: PrimaryRoute::Email,
//!     email_fallback_enabled: false,
//!     support_email_address: "help@example.org".to_string(),
//! };
//! config.validate().expect("valid routing config");
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First-choice delivery channel for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryRoute {
    /// Create an incident through the ticketing system API.
    #[serde(rename = "TicketingAPI", alias = "ticketing_api")]
    TicketingApi,
    /// Send the request to the support mailbox.
    #[serde(alias = "email")]
    Email,
}

impl PrimaryRoute {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryRoute::TicketingApi => "TicketingAPI",
            PrimaryRoute::Email => "Email",
        }
    }
}

impl fmt::Display for PrimaryRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryRoute {
    type Err = ConfigError;

    /// Case-insensitive; accepts `TicketingAPI`, `ticketing_api`, `api` and `email`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ticketingapi" | "ticketing_api" | "api" => Ok(PrimaryRoute::TicketingApi),
            "email" => Ok(PrimaryRoute::Email),
            _ => Err(ConfigError::UnknownRoute(s.to_string())),
        }
    }
}

/// Process-wide, read-only routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Route every payload is annotated with.
    pub primary_route: PrimaryRoute,

    /// Whether the email channel backs up the primary route.
    ///
    /// Only affects payload annotation and status wording; no failure
    /// detection happens in this crate.
    pub email_fallback_enabled: bool,

    /// Mailbox named in the status message when the primary route is email.
    pub support_email_address: String,
}

/// Configuration validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("support email address must not be empty")]
    EmptySupportEmail,

    #[error("support email address {0:?} is not a valid mailbox")]
    InvalidSupportEmail(String),

    #[error("unknown primary route {0:?}; expected TicketingAPI or Email")]
    UnknownRoute(String),
}

impl Default for RoutingConfig {
    /// Ticketing API first, email fallback on.
    fn default() -> Self {
        Self {
            primary_route: PrimaryRoute::TicketingApi,
            email_fallback_enabled: true,
            support_email_address: "support@example.org".into(),
        }
    }
}

impl RoutingConfig {
    /// Checks that the support address looks like `local@domain`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let address = self.support_email_address.trim();
        if address.is_empty() {
            return Err(ConfigError::EmptySupportEmail);
        }

        let plausible = match address.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !address.contains(char::is_whitespace)
            }
            None => false,
        };
        if !plausible {
            return Err(ConfigError::InvalidSupportEmail(address.to_string()));
        }

        Ok(())
    }
}
