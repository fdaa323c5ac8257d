//! Application state and factory
//!
//! Builds the shared services once and exposes `create_app`, used by both
//! the binary and the integration tests.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use rb_core::errors::ROUTE_NOT_FOUND;
use rb_core::{
    CodeGenerator, DeliveryGateway, IssuanceConfig, IssuanceService, OneTimeCodeRepository,
    VerificationService,
};
use rb_shared::{HealthResponse, MessageResponse};

use crate::handlers::json_error_handler;
use crate::routes;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "reelbase-otp-api";

pub type SharedIssuanceService = IssuanceService<dyn DeliveryGateway, dyn OneTimeCodeRepository>;
pub type SharedVerificationService = VerificationService<dyn OneTimeCodeRepository>;

/// Application state that holds shared services
pub struct AppState {
    pub issuance_service: Arc<SharedIssuanceService>,
    pub verification_service: Arc<SharedVerificationService>,
}

impl AppState {
    /// Wire both services over the same code store
    pub fn new(
        gateway: Arc<dyn DeliveryGateway>,
        repository: Arc<dyn OneTimeCodeRepository>,
        generator: Box<dyn CodeGenerator>,
        config: IssuanceConfig,
    ) -> Self {
        Self {
            issuance_service: Arc::new(IssuanceService::new(
                gateway,
                repository.clone(),
                generator,
                config,
            )),
            verification_service: Arc::new(VerificationService::new(repository)),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: Cors,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // registration order is inside-out: TracingLogger sees every request first
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .configure(routes::otp::configure)
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::message(ROUTE_NOT_FOUND))
}
