//! CORS middleware configuration for cross-origin requests.
//!
//! Outside production any origin is accepted. In production only the
//! origins listed in `ALLOWED_ORIGINS` are.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use rb_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring permissive CORS for non-production environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age)
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
