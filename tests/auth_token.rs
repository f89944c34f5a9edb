use storefront_api::{
    error::AppError,
    middleware::auth::decode_token,
    services::auth_service::issue_token,
};
use uuid::Uuid;

const SECRET: &str = "test-secret";

#[test]
fn token_round_trip_carries_admin_claim() {
    let user_id = Uuid::new_v4();
    let token = issue_token(SECRET, user_id, "admin@example.com", true).expect("token");

    let user = decode_token(&token, SECRET).expect("decoded");
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.email, "admin@example.com");
    assert!(user.admin);

    let token = issue_token(SECRET, user_id, "user@example.com", false).expect("token");
    assert!(!decode_token(&token, SECRET).expect("decoded").admin);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let token = issue_token(SECRET, Uuid::new_v4(), "user@example.com", true).expect("token");
    assert!(matches!(
        decode_token(&token, "another-secret"),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        decode_token("garbage", SECRET),
        Err(AppError::Unauthorized(_))
    ));
}
