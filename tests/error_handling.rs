use esupport::{
    EnvironmentDescriptor, Field, IntakeError, RawFields, RoutingConfig, submit, validate,
};

fn descriptor() -> EnvironmentDescriptor {
    EnvironmentDescriptor::new("Mozilla/5.0 Firefox/121.0", "https://example.org/help")
}

#[test]
fn email_mismatch_is_user_facing_and_blocks_the_payload() {
    let fields = RawFields::new()
        .with(Field::Email, "a@b.com")
        .with(Field::ConfirmEmail, "a@c.com")
        .with(Field::Service, "Parking");

    let result = submit(&fields, &descriptor(), &RoutingConfig::default());

    match result {
        Err(err @ IntakeError::EmailMismatch) => {
            assert!(err.is_user_facing());
            assert_eq!(err.to_string(), "Email addresses do not match.");
        }
        other => panic!("expected EmailMismatch, got {other:?}"),
    }
}

#[test]
fn whitespace_around_emails_is_ignored() {
    let fields = RawFields::new()
        .with(Field::Email, "  a@b.com ")
        .with(Field::ConfirmEmail, "a@b.com\t");
    assert!(validate(&fields).is_ok());
}

#[test]
fn missing_confirmation_is_fine() {
    let fields = RawFields::new().with(Field::Email, "a@b.com");
    assert!(validate(&fields).is_ok());
    assert!(submit(&fields, &descriptor(), &RoutingConfig::default()).is_ok());
}

#[test]
fn other_without_description_is_not_user_facing() {
    let fields = RawFields::new()
        .with(Field::Email, "a@b.com")
        .with(Field::Service, "Other")
        .with(Field::OtherService, "   ");

    let err = submit(&fields, &descriptor(), &RoutingConfig::default())
        .expect_err("blank Other detail must be refused");
    assert_eq!(err, IntakeError::MissingOtherDetail);
    assert!(!err.is_user_facing());
}

#[test]
fn garbage_environment_still_submits() {
    let fields = RawFields::new().with(Field::Email, "a@b.com");
    let descriptor = EnvironmentDescriptor::new("\u{0}\u{1}???", "");
    let outcome =
        submit(&fields, &descriptor, &RoutingConfig::default()).expect("submission succeeds");
    assert_eq!(outcome.payload.technical_context.browser, "Unknown");
    assert_eq!(outcome.payload.technical_context.os, "Unknown");
}
