use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use rb_core::errors::{DeliveryError, INVALID_REQUEST_BODY, MISSING_PHONE_OR_CODE, SEND_FAILED, SEND_SUCCEEDED};

use crate::common::{test_context, StubGateway};

#[actix_rt::test]
async fn test_send_code_success_passes_provider_payload_through() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "+84901234567", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "message": SEND_SUCCEEDED, "data": { "CodeResult": "100" } })
    );
    assert_eq!(
        ctx.gateway.calls(),
        vec![("+84901234567".to_string(), "123456".to_string())]
    );
}

#[actix_rt::test]
async fn test_send_code_returns_full_provider_body() {
    let provider_body = json!({ "CodeResult": "100", "CountRegenerate": 0, "SMSID": "5a1e-77" });
    let ctx = test_context(StubGateway::answering(provider_body.clone()), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "0901234567", "otp": "987654" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], provider_body);
}

#[actix_rt::test]
async fn test_send_code_missing_phone() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": MISSING_PHONE_OR_CODE }));
    assert!(ctx.gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_send_code_blank_fields_count_as_missing() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    for payload in [
        json!({ "phone": "   ", "otp": "123456" }),
        json!({ "phone": "+84901234567", "otp": "" }),
        json!({}),
    ] {
        let req = test::TestRequest::post().uri("/send").set_json(payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], MISSING_PHONE_OR_CODE);
    }
    assert!(ctx.gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_send_code_delivery_failure() {
    let ctx = test_context(
        StubGateway::failing(DeliveryError::Transport("connection refused".to_string())),
        &[],
    );
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "+84901234567", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": SEND_FAILED, "error": "connection refused" }));
    assert_eq!(ctx.gateway.calls().len(), 1);
}

#[actix_rt::test]
async fn test_send_code_provider_status_error_keeps_reason() {
    let ctx = test_context(
        StubGateway::failing(DeliveryError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        }),
        &[],
    );
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "+84901234567", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("bad gateway"));
}

#[actix_rt::test]
async fn test_send_code_does_not_persist() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "+84901234567", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.store.is_empty().unwrap());
}

#[actix_rt::test]
async fn test_send_code_malformed_json() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"phone": "+84901234567", "otp": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], INVALID_REQUEST_BODY);
    assert!(body["error"].is_string());
    assert!(ctx.gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_send_code_wrong_field_type_is_invalid_body() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": 84901234567u64, "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], INVALID_REQUEST_BODY);
}

#[actix_rt::test]
async fn test_send_code_overlong_phone_is_invalid_body() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/send")
        .set_json(json!({ "phone": "+8490123456789012345678", "otp": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], INVALID_REQUEST_BODY);
    assert_eq!(body["error"], "invalid field(s): phone");
}
