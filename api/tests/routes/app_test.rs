use actix_web::{http::StatusCode, test};
use serde_json::Value;

use rb_core::errors::ROUTE_NOT_FOUND;

use crate::common::{test_context, StubGateway};

#[actix_rt::test]
async fn test_health_check() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "reelbase-otp-api");
    assert!(body["timestamp"].is_string());
}

#[actix_rt::test]
async fn test_unknown_route_returns_404() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], ROUTE_NOT_FOUND);
}

#[actix_rt::test]
async fn test_get_on_post_route_is_rejected() {
    let ctx = test_context(StubGateway::succeeding(), &[]);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/send").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(ctx.gateway.calls().is_empty());
}
