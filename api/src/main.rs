use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use tracing_subscriber::EnvFilter;

use rb_api::middleware::create_cors;
use rb_api::{create_app, AppState};
use rb_core::{
    CodeCleanupConfig, CodeCleanupService, IssuanceConfig, NumericCodeGenerator,
    OneTimeCodeRepository,
};
use rb_infra::{
    create_delivery_gateway, DatabasePool, InMemoryOneTimeCodeRepository,
    MySqlOneTimeCodeRepository,
};
use rb_shared::{AppConfig, CodeStoreBackend, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
    init_tracing(&config.logging);

    info!("Starting Reelbase OTP API ({})", config.environment);

    let (repository, pool): (Arc<dyn OneTimeCodeRepository>, Option<DatabasePool>) =
        match config.otp.store {
            CodeStoreBackend::Mysql => {
                let pool = DatabasePool::new(config.database.clone())
                    .await
                    .context("failed to connect to the database")?;
                pool.run_migrations()
                    .await
                    .context("failed to run database migrations")?;
                info!("{}", pool.get_statistics());
                let repository: Arc<dyn OneTimeCodeRepository> =
                    Arc::new(MySqlOneTimeCodeRepository::new(pool.get_pool().clone()));
                (repository, Some(pool))
            }
            CodeStoreBackend::Memory => {
                log::warn!("Using in-memory code store; issued codes are lost on restart");
                let repository: Arc<dyn OneTimeCodeRepository> =
                    Arc::new(InMemoryOneTimeCodeRepository::new());
                (repository, None)
            }
        };

    let gateway = create_delivery_gateway(&config.sms).context("failed to create SMS gateway")?;
    info!("Delivering codes through the {} gateway", gateway.provider_name());

    let generator = NumericCodeGenerator::new(config.otp.code_length)?;

    let cleanup = CodeCleanupService::new(
        repository.clone(),
        CodeCleanupConfig {
            interval_seconds: config.otp.purge_interval_seconds,
            ..Default::default()
        },
    );
    Arc::new(cleanup).start_background_task();

    let app_state = web::Data::new(AppState::new(
        gateway,
        repository,
        Box::new(generator),
        IssuanceConfig::from(&config.otp),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(
            app_state.clone(),
            create_cors(&cors_config, environment),
            max_payload_size,
        )
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.compact {
        builder.compact().init();
    } else {
        builder.init();
    }
}
