//! Best-effort classification of the client environment.
//!
//! The descriptor is an opaque user-agent string. Browser and operating system
//! are recognised through ordered signature tables; the first signature that
//! matches anywhere in the descriptor wins, so table order is priority order.
//! Device class comes from plain keyword lookups.
//!
//! ```text
//! "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ... Chrome/118.0.0.0 Safari/537.36"
//!        │
//!        ├─ BROWSER_SIGNATURES ─▶ "Chrome 118"      (Edge tried first, no match)
//!        ├─ OS_SIGNATURES ──────▶ "Mac OS X 10.15.7"
//!        └─ DEVICE_KEYWORDS ────▶ Desktop
//! ```
//!
//! Nothing here fails: unrecognised input degrades to `"Unknown"` and
//! [`Device::Desktop`].
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{Device, EnvironmentDescriptor, ParsedEnvironment};

/// Label used when no signature matches.
pub const UNKNOWN: &str = "Unknown";

/// How the matched text of an OS signature becomes the reported label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    Verbatim,
    /// `10_15_7` becomes `10.15.7`.
    UnderscoresToDots,
}

impl Normalization {
    fn apply(self, matched: &str) -> String {
        match self {
            Normalization::Verbatim => matched.to_string(),
            Normalization::UnderscoresToDots => matched.replace('_', "."),
        }
    }
}

/// A browser recognised by product token; group 1 of `pattern` is the major
/// version.
#[derive(Debug, Clone, Copy)]
pub struct BrowserSignature {
    pub label: &'static str,
    pub pattern: &'static str,
}

/// An operating system signature; the whole match is the label.
#[derive(Debug, Clone, Copy)]
pub struct OsSignature {
    pub pattern: &'static str,
    pub normalization: Normalization,
}

/// Browser signatures in priority order.
///
/// Chromium-based browsers also advertise `Chrome` and `Safari`, and Chrome
/// advertises `Safari`, hence Edge before Chrome before Safari. Legacy IE is
/// found either by its own name or by its engine token.
pub const BROWSER_SIGNATURES: &[BrowserSignature] = &[
    BrowserSignature {
        label: "Edge",
        pattern: r"(?i)edge?/?\s*(\d+)",
    },
    BrowserSignature {
        label: "Chrome",
        pattern: r"(?i)chrome/?\s*(\d+)",
    },
    BrowserSignature {
        label: "Safari",
        pattern: r"(?i)safari/?\s*(\d+)",
    },
    BrowserSignature {
        label: "Firefox",
        pattern: r"(?i)firefox/?\s*(\d+)",
    },
    BrowserSignature {
        label: "Internet Explorer",
        pattern: r"(?i)msie/?\s*(\d+)",
    },
    BrowserSignature {
        label: "Internet Explorer",
        pattern: r"(?i)trident/?\s*(\d+)",
    },
];

/// OS signatures in priority order: desktop NT, desktop Unix, then mobile.
pub const OS_SIGNATURES: &[OsSignature] = &[
    OsSignature {
        pattern: r"(?i)windows nt [\d.]+",
        normalization: Normalization::Verbatim,
    },
    OsSignature {
        pattern: r"(?i)mac os x [\d_]+",
        normalization: Normalization::UnderscoresToDots,
    },
    OsSignature {
        pattern: r"(?i)android [\d.]+",
        normalization: Normalization::Verbatim,
    },
    OsSignature {
        pattern: r"(?i)iphone os [\d_]+",
        normalization: Normalization::UnderscoresToDots,
    },
    OsSignature {
        pattern: r"(?i)ipad; cpu os [\d_]+",
        normalization: Normalization::UnderscoresToDots,
    },
];

/// Lowercase keywords per device class. Mobile is checked first, so a
/// descriptor carrying both mobile and tablet tokens is Mobile.
pub const DEVICE_KEYWORDS: &[(Device, &[&str])] = &[
    (Device::Mobile, &["mobile", "iphone", "android"]),
    (Device::Tablet, &["ipad", "tablet"]),
];

static BROWSER_MATCHERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    BROWSER_SIGNATURES
        .iter()
        .map(|sig| {
            let re = Regex::new(sig.pattern).expect("browser signature patterns are valid");
            (re, sig.label)
        })
        .collect()
});

static OS_MATCHERS: LazyLock<Vec<(Regex, Normalization)>> = LazyLock::new(|| {
    OS_SIGNATURES
        .iter()
        .map(|sig| {
            let re = Regex::new(sig.pattern).expect("os signature patterns are valid");
            (re, sig.normalization)
        })
        .collect()
});

/// Classifies `descriptor` into browser, OS and device, passing page URL and
/// referrer through unchanged.
///
/// ```rust
/// use intake::{parse_environment, Device, EnvironmentDescriptor};
///
/// let descriptor = EnvironmentDescriptor::new(
///     "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
///     "https://example.org/support",
/// );
/// let env = parse_environment(&descriptor);
/// assert_eq!(env.browser, "Firefox 121");
/// assert_eq!(env.os, "Windows NT 10.0");
/// assert_eq!(env.device, Device::Desktop);
/// assert_eq!(env.referrer, "");
/// ```
pub fn parse_environment(descriptor: &EnvironmentDescriptor) -> ParsedEnvironment {
    let ua = descriptor.user_agent.as_str();
    let parsed = ParsedEnvironment {
        browser: classify_browser(ua),
        os: classify_os(ua),
        device: classify_device(ua),
        page_url: descriptor.page_url.clone(),
        referrer: descriptor.referrer.clone().unwrap_or_default(),
    };

    debug!(
        browser = %parsed.browser,
        os = %parsed.os,
        device = %parsed.device,
        "environment_classified"
    );
    parsed
}

/// `"{name} {version}"` for the first matching browser signature.
pub fn classify_browser(ua: &str) -> String {
    for (re, label) in BROWSER_MATCHERS.iter() {
        if let Some(caps) = re.captures(ua) {
            return match caps.get(1) {
                Some(version) => format!("{label} {}", version.as_str()),
                None => (*label).to_string(),
            };
        }
    }
    UNKNOWN.to_string()
}

/// Matched OS signature text after normalization.
pub fn classify_os(ua: &str) -> String {
    OS_MATCHERS
        .iter()
        .find_map(|(re, normalization)| re.find(ua).map(|m| normalization.apply(m.as_str())))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn classify_device(ua: &str) -> Device {
    let lowered = ua.to_lowercase();
    DEVICE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(device, _)| *device)
        .unwrap_or(Device::Desktop)
}
