use storefront_api::{
    dto::orders::CheckoutRequest,
    error::AppError,
    services::order_service::{TrackingKey, parse_tracking_key, shipping_details},
};
use uuid::Uuid;

fn request() -> CheckoutRequest {
    CheckoutRequest {
        customer_name: " Asha Rao ".into(),
        email: "asha@example.com".into(),
        country_code: None,
        phone: "9876543210".into(),
        address: "12 MG Road".into(),
        city: "Bengaluru".into(),
        zip: "560001".into(),
        items: Vec::new(),
    }
}

#[test]
fn joins_address_and_prefixes_phone() {
    let details = shipping_details(&request(), "+91").expect("valid details");
    assert_eq!(details.customer_name, "Asha Rao");
    assert_eq!(details.phone, "+919876543210");
    assert_eq!(details.address, "12 MG Road, Bengaluru, 560001");
}

#[test]
fn explicit_country_code_wins() {
    let mut payload = request();
    payload.country_code = Some("+44".into());
    let details = shipping_details(&payload, "+91").expect("valid details");
    assert_eq!(details.phone, "+449876543210");

    payload.country_code = Some("  ".into());
    let details = shipping_details(&payload, "+91").expect("valid details");
    assert_eq!(details.phone, "+919876543210");
}

#[test]
fn missing_fields_are_rejected() {
    let mut payload = request();
    payload.zip = "   ".into();
    match shipping_details(&payload, "+91") {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "zip is required"),
        other => panic!("expected bad request, got {other:?}"),
    }

    let mut payload = request();
    payload.email = String::new();
    assert!(matches!(
        shipping_details(&payload, "+91"),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn tracking_key_accepts_numbers_and_ids() {
    assert_eq!(
        parse_tracking_key(" #1001 "),
        TrackingKey {
            order_number: Some(1001),
            legacy_id: None,
        }
    );

    let id = Uuid::new_v4();
    let key = parse_tracking_key(&id.to_string());
    assert_eq!(key.order_number, None);
    assert_eq!(key.legacy_id, Some(id));

    let key = parse_tracking_key("not-an-order");
    assert_eq!(key.order_number, None);
    assert_eq!(key.legacy_id, None);
}
