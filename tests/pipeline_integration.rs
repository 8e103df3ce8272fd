use esupport::{
    Device, EnvironmentDescriptor, Field, OptionalDetails, PrimaryRoute, RawFields, Reference,
    RoutingConfig, submit, submit_with_reference,
};
use serde_json::Value;

const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_2 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1.2 Mobile/15E148 Safari/604.1";
const CHROME_DESKTOP: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

fn contact_fields(service: &str) -> RawFields {
    RawFields::new()
        .with(Field::FullName, "Sam Rivera")
        .with(Field::Email, "sam@example.org")
        .with(Field::ConfirmEmail, "sam@example.org")
        .with(Field::Phone, "867-555-0199")
        .with(Field::Service, service)
        .with(Field::Task, "Pay a fine")
        .with(Field::Issue, "Card was declined twice")
        .with(Field::Error, "DECLINED")
        .with(Field::Timestamp, "2024-05-02T09:30")
}

fn desktop() -> EnvironmentDescriptor {
    EnvironmentDescriptor::new(CHROME_DESKTOP, "https://example.org/pay")
        .with_referrer("https://example.org/")
}

#[test]
fn other_request_with_ticketing_and_fallback() {
    let fields = RawFields::new()
        .with(Field::Email, "a@b.com")
        .with(Field::ConfirmEmail, "a@b.com")
        .with(Field::Service, "Other")
        .with(Field::OtherService, "Login button missing");
    let config = RoutingConfig {
        primary_route: PrimaryRoute::TicketingApi,
        email_fallback_enabled: true,
        ..Default::default()
    };

    let outcome = submit(&fields, &desktop(), &config).expect("submission succeeds");

    assert_eq!(outcome.payload.other_detail(), Some("Login button missing"));
    let message = &outcome.status.message;
    assert!(message.starts_with("Success! Your request has been captured. Reference: ESUP-"));
    assert!(message.contains("We will create an incident with the details provided."));
    assert!(message.contains("If the API is unavailable, we will send the same payload via email."));
}

#[test]
fn payment_request_full_wire_shape() {
    let fields = contact_fields("Payment / Checkout / Cart")
        .with(Field::OrderNumber, "ORD-2024-17")
        .with(Field::CardLast4, "0005")
        .with(Field::PaymentProvider, "Stripe")
        .with(Field::Username, "should-not-appear");
    let reference = Reference::from_number(77_001).expect("in range");

    let outcome = submit_with_reference(&fields, &desktop(), &RoutingConfig::default(), reference)
        .expect("submission succeeds");
    let value: Value = serde_json::from_str(&outcome.status.payload_json).expect("valid json");

    assert_eq!(value["route"], "TicketingAPI");
    assert_eq!(value["fallbackEnabled"], true);
    assert_eq!(value["contact"]["fullName"], "Sam Rivera");
    assert_eq!(value["contact"]["confirmEmail"], "sam@example.org");
    assert_eq!(value["service"]["name"], "Payment / Checkout / Cart");
    assert!(value["service"].get("otherDetail").is_none());
    assert_eq!(value["issue"]["task"], "Pay a fine");
    assert_eq!(value["issue"]["description"], "Card was declined twice");
    assert_eq!(value["issue"]["error"], "DECLINED");
    assert_eq!(value["issue"]["timestamp"], "2024-05-02T09:30");
    assert_eq!(value["technicalContext"]["browser"], "Chrome 118");
    assert_eq!(value["technicalContext"]["os"], "Mac OS X 10.15.7");
    assert_eq!(value["technicalContext"]["device"], "Desktop");
    assert_eq!(value["technicalContext"]["pageUrl"], "https://example.org/pay");
    assert_eq!(value["technicalContext"]["referrer"], "https://example.org/");
    assert_eq!(
        value["optionalDetails"],
        serde_json::json!({
            "payment": {"orderNumber": "ORD-2024-17", "cardLast4": "0005", "provider": "Stripe"}
        })
    );
    assert_eq!(value["summary"], "[Payment / Checkout / Cart] Pay a fine");
    assert_eq!(value["reference"], "ESUP-77001");
    assert_eq!(value["routeTaken"], "TicketingAPI");
}

#[test]
fn account_request_from_a_phone_by_email() {
    let fields = contact_fields("Account / Login / Registration")
        .with(Field::Username, "srivera")
        .with(Field::AccountId, "A-991")
        .with(Field::OrderNumber, "should-not-appear");
    let config = RoutingConfig {
        primary_route: PrimaryRoute::Email,
        email_fallback_enabled: false,
        support_email_address: "desk@example.org".into(),
    };
    let descriptor = EnvironmentDescriptor::new(SAFARI_IPHONE, "https://example.org/login");

    let outcome = submit(&fields, &descriptor, &config).expect("submission succeeds");

    assert!(matches!(outcome.payload.details, OptionalDetails::Account(_)));
    assert!(outcome.payload.payment().is_none());
    assert_eq!(outcome.payload.technical_context.device, Device::Mobile);
    assert_eq!(outcome.payload.technical_context.os, "iPhone OS 17.1.2");
    assert_eq!(outcome.payload.technical_context.referrer, "");
    assert_eq!(outcome.payload.route_taken, Some(PrimaryRoute::Email));
    assert!(outcome.status.message.ends_with(
        "We will email desk@example.org with your request and the machine-readable payload."
    ));
    assert!(!outcome.status.message.contains("incident"));
}

#[test]
fn unlisted_service_has_no_optional_sections() {
    let fields = contact_fields("Building Permits").with(Field::ConfirmEmail, "");
    let outcome = submit(&fields, &desktop(), &RoutingConfig::default()).expect("submission succeeds");
    let value: Value = serde_json::from_str(&outcome.status.payload_json).expect("valid json");

    assert_eq!(value["optionalDetails"], serde_json::json!({}));
    assert!(value["contact"].get("confirmEmail").is_none());
    assert_eq!(value["summary"], "[Building Permits] Pay a fine");
}

#[test]
fn route_always_matches_configuration() {
    for route in [PrimaryRoute::TicketingApi, PrimaryRoute::Email] {
        let config = RoutingConfig {
            primary_route: route,
            ..Default::default()
        };
        for service in ["Payment / Checkout / Cart", "Account / Login / Registration", "Parking"] {
            let outcome = submit(&contact_fields(service), &desktop(), &config)
                .expect("submission succeeds");
            assert_eq!(outcome.payload.route, route);
            assert_eq!(outcome.payload.route_taken, Some(route));
        }
    }
}
