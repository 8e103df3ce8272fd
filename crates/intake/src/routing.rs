//! Static routing decision.
//!
//! Routing depends on configuration only, never on what the requester typed:
//! every payload goes to the configured primary route, and the fallback flag
//! is a capability advertised in the payload and the status text.
use serde::{Deserialize, Serialize};

use crate::config::{PrimaryRoute, RoutingConfig};

const FALLBACK_ENABLED_TEXT: &str = "Email fallback is enabled if the primary route fails.";
const NO_FALLBACK_TEXT: &str = "No fallback enabled.";

/// Routing facts merged into a payload on finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnnotation {
    pub route: PrimaryRoute,
    pub fallback_enabled: bool,
}

/// Annotation plus the human-readable explanation of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub annotation: RouteAnnotation,
    pub explanation: String,
}

/// Resolves `config` into a [`RoutingDecision`].
///
/// ```rust
/// use intake::{describe_routing, PrimaryRoute, RoutingConfig};
///
/// let decision = describe_routing(&RoutingConfig::default());
/// assert_eq!(decision.annotation.route, PrimaryRoute::TicketingApi);
/// assert_eq!(
///     decision.explanation,
///     "TicketingAPI is configured as the primary submission route. \
///      Email fallback is enabled if the primary route fails."
/// );
/// ```
pub fn describe_routing(config: &RoutingConfig) -> RoutingDecision {
    RoutingDecision {
        annotation: RouteAnnotation {
            route: config.primary_route,
            fallback_enabled: config.email_fallback_enabled,
        },
        explanation: routing_notice(config),
    }
}

/// The always-visible routing notice; identical to the decision's explanation.
pub fn routing_notice(config: &RoutingConfig) -> String {
    let fallback = if config.email_fallback_enabled {
        FALLBACK_ENABLED_TEXT
    } else {
        NO_FALLBACK_TEXT
    };
    format!(
        "{} is configured as the primary submission route. {fallback}",
        config.primary_route
    )
}
