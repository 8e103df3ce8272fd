//! Outcome message shown after a successful submission.
use serde::Serialize;

use crate::config::{PrimaryRoute, RoutingConfig};
use crate::types::Payload;

/// Display text plus the machine-readable payload for the audit panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub message: String,
    /// Pretty-printed JSON of the finalized payload.
    pub payload_json: String,
}

/// Composes the status message for a finalized payload.
///
/// Wording depends on the route recorded in the payload; the support mailbox
/// comes from `config`.
///
/// `payload` must have gone through [`Payload::finalize`]; an unfinalized
/// payload has no reference to quote.
pub fn report(payload: &Payload, config: &RoutingConfig) -> StatusMessage {
    debug_assert!(payload.is_finalized(), "report needs a finalized payload");
    let reference = payload
        .reference
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    let mut message = format!("Success! Your request has been captured. Reference: {reference}.");
    match payload.route {
        PrimaryRoute::TicketingApi => {
            message.push_str(" We will create an incident with the details provided.");
            if payload.fallback_enabled {
                message.push_str(" If the API is unavailable, we will send the same payload via email.");
            }
        }
        PrimaryRoute::Email => {
            message.push_str(&format!(
                " We will email {} with your request and the machine-readable payload.",
                config.support_email_address
            ));
        }
    }

    StatusMessage {
        message,
        payload_json: payload.to_json_pretty(),
    }
}
