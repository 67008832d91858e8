use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workshop_analytics::analytics::repositories::MySqlRecordRepository;
use workshop_analytics::config::{Config, LogFormat};
use workshop_analytics::middleware::RequestContext;
use workshop_analytics::reports::repositories::MySqlReportStore;
use workshop_analytics::AppServices;

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "workshop_analytics=debug,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.app.log_format);
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting workshop analytics service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let services = AppServices::new(
        Arc::new(MySqlRecordRepository::new(db_pool.clone())),
        Arc::new(MySqlReportStore::new(db_pool)),
        &config.reporting,
    );

    tracing::info!(
        deadline_secs = config.reporting.deadline.as_secs(),
        top_n = config.reporting.top_n,
        expense_ratio = %config.reporting.expense_ratio,
        "Reporting configured"
    );

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(RequestContext)
            .wrap(TracingLogger::default())
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .configure(move |cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
