use esupport::{
    EnvironmentDescriptor, Field, RawFields, Reference, RoutingConfig, parse_environment,
    submit_with_reference,
};

const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";

#[test]
fn environment_parsing_is_stable() {
    let descriptor = EnvironmentDescriptor::new(EDGE, "https://example.org");
    let first = parse_environment(&descriptor);
    for _ in 0..10 {
        assert_eq!(parse_environment(&descriptor), first);
    }
    assert_eq!(first.browser, "Edge 120");
    assert_eq!(first.os, "Windows NT 10.0");
}

#[test]
fn same_input_and_reference_give_identical_payloads() {
    let fields = RawFields::new()
        .with(Field::Email, "a@b.com")
        .with(Field::Service, "Account / Login / Registration")
        .with(Field::Username, "ab");
    let descriptor = EnvironmentDescriptor::new(EDGE, "https://example.org");
    let config = RoutingConfig::default();
    let reference = Reference::from_number(42_424).expect("in range");

    let a = submit_with_reference(&fields, &descriptor, &config, reference.clone())
        .expect("first submission");
    let b = submit_with_reference(&fields, &descriptor, &config, reference)
        .expect("second submission");

    assert_eq!(a, b);
    assert_eq!(a.status.payload_json, b.status.payload_json);
}
