use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use rb_core::errors::{DeliveryError, MISSING_USER_OR_PHONE, SEND_FAILED, SEND_SUCCEEDED};

use crate::common::{test_context, StubGateway};

#[actix_rt::test]
async fn test_issue_code_success_never_echoes_code() {
    let ctx = test_context(StubGateway::succeeding(), &["482913"]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/otp/issue")
        .set_json(json!({ "user_id": "user-42", "phone": "+84901234567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], SEND_SUCCEEDED);
    assert_eq!(body["data"]["user_id"], "user-42");
    assert_eq!(body["data"]["provider"], json!({ "CodeResult": "100" }));
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["expires_at"].is_string());
    assert!(!body.to_string().contains("482913"));

    assert_eq!(
        ctx.gateway.calls(),
        vec![("+84901234567".to_string(), "482913".to_string())]
    );
    assert_eq!(ctx.store.len().unwrap(), 1);
}

#[actix_rt::test]
async fn test_issue_code_missing_user() {
    let ctx = test_context(StubGateway::succeeding(), &["482913"]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/otp/issue")
        .set_json(json!({ "phone": "+84901234567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": MISSING_USER_OR_PHONE }));
    assert!(ctx.gateway.calls().is_empty());
    assert!(ctx.store.is_empty().unwrap());
}

#[actix_rt::test]
async fn test_issue_code_delivery_failure() {
    let ctx = test_context(
        StubGateway::failing(DeliveryError::Rejected {
            code: "99".to_string(),
            message: "Unknown error".to_string(),
        }),
        &["482913"],
    );
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/otp/issue")
        .set_json(json!({ "user_id": "user-42", "phone": "+84901234567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], SEND_FAILED);
    assert!(body["error"].as_str().unwrap().contains("Unknown error"));
}
