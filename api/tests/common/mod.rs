//! Shared fixtures: a recording gateway stub and a scripted code generator

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_web::web;
use rb_api::AppState;
use rb_core::{CodeGenerator, DeliveryError, DeliveryGateway, IssuanceConfig, ProviderResponse};
use rb_infra::InMemoryOneTimeCodeRepository;

/// Gateway stub returning a canned result and recording every call
pub struct StubGateway {
    response: Result<Value, DeliveryError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubGateway {
    pub fn succeeding() -> Arc<Self> {
        Self::answering(json!({ "CodeResult": "100" }))
    }

    pub fn answering(body: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(body),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: DeliveryError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryGateway for StubGateway {
    async fn send_code(&self, phone: &str, code: &str) -> Result<ProviderResponse, DeliveryError> {
        self.calls
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        self.response.clone()
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// Generator handing out a fixed sequence of codes
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "000000".to_string())
    }
}

/// Everything a test needs to drive the app and inspect side effects
pub struct TestContext {
    pub state: web::Data<AppState>,
    pub gateway: Arc<StubGateway>,
    pub store: Arc<InMemoryOneTimeCodeRepository>,
}

pub fn test_context(gateway: Arc<StubGateway>, codes: &[&str]) -> TestContext {
    let store = Arc::new(InMemoryOneTimeCodeRepository::new());
    let state = web::Data::new(AppState::new(
        gateway.clone(),
        store.clone(),
        Box::new(ScriptedGenerator::new(codes)),
        IssuanceConfig::default(),
    ));

    TestContext {
        state,
        gateway,
        store,
    }
}

/// Build the full application around a test context
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(rb_api::create_app(
            $ctx.state.clone(),
            rb_api::middleware::create_cors(
                &rb_shared::CorsConfig::default(),
                rb_shared::Environment::Development,
            ),
            64 * 1024,
        ))
        .await
    };
}
