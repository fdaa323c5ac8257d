use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use rb_core::errors::{
    DeliveryError, CODE_MISMATCH, CODE_NOT_FOUND_OR_EXPIRED, MISSING_USER_OR_CODE, VERIFY_SUCCEEDED,
};

use crate::common::{test_context, StubGateway};

fn issue_request(user_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/otp/issue")
        .set_json(json!({ "user_id": user_id, "phone": "+84901234567" }))
}

fn verify_request(user_id: &str, otp: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/verify")
        .set_json(json!({ "user_id": user_id, "otp": otp }))
}

#[actix_rt::test]
async fn test_issue_then_verify_once() {
    let ctx = test_context(StubGateway::succeeding(), &["123456"]);
    let app = init_app!(ctx);

    let issued: Value = test::call_and_read_body_json(&app, issue_request("user-1").to_request()).await;

    let resp = test::call_service(&app, verify_request("user-1", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], VERIFY_SUCCEEDED);
    assert_eq!(body["data"]["id"], issued["data"]["id"]);
    assert!(body["data"]["verified_at"].is_string());

    // a consumed code cannot be replayed
    let resp = test::call_service(&app, verify_request("user-1", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "message": CODE_NOT_FOUND_OR_EXPIRED, "error": "not_found_or_expired" })
    );
}

#[actix_rt::test]
async fn test_verify_wrong_code_is_mismatch() {
    let ctx = test_context(StubGateway::succeeding(), &["123456"]);
    let app = init_app!(ctx);

    test::call_service(&app, issue_request("user-1").to_request()).await;

    let resp = test::call_service(&app, verify_request("user-1", "654321").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": CODE_MISMATCH, "error": "mismatch" }));

    // a mismatch does not consume the code
    let resp = test::call_service(&app, verify_request("user-1", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_verify_unknown_user() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let resp = test::call_service(&app, verify_request("nobody", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_verify_missing_fields() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/verify")
        .set_json(json!({ "user_id": "user-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": MISSING_USER_OR_CODE }));
}

#[actix_rt::test]
async fn test_reissue_invalidates_previous_code() {
    let ctx = test_context(StubGateway::succeeding(), &["111111", "222222"]);
    let app = init_app!(ctx);

    test::call_service(&app, issue_request("user-1").to_request()).await;
    test::call_service(&app, issue_request("user-1").to_request()).await;

    let resp = test::call_service(&app, verify_request("user-1", "111111").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, verify_request("user-1", "222222").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_undelivered_code_cannot_be_verified() {
    let ctx = test_context(
        StubGateway::failing(DeliveryError::Transport("connection reset".to_string())),
        &["123456"],
    );
    let app = init_app!(ctx);

    let resp = test::call_service(&app, issue_request("user-1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = test::call_service(&app, verify_request("user-1", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_codes_are_scoped_per_user() {
    let ctx = test_context(StubGateway::succeeding(), &["123456"]);
    let app = init_app!(ctx);

    test::call_service(&app, issue_request("user-1").to_request()).await;

    let resp = test::call_service(&app, verify_request("user-2", "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
