use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use invoice_renderer::api::middleware::{create_compression_middleware, create_cors_middleware};
use invoice_renderer::api::{configure_app, ApiState, AppConfig};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    prometheus::default_registry()
        .register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        template_dir = ?config.template_dir,
        compression = config.enable_compression,
        "Starting invoice renderer"
    );

    let host = config.host.clone();
    let port = config.port;
    let enable_compression = config.enable_compression;

    let state = web::Data::new(ApiState::new(config)?);

    tracing::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(create_cors_middleware())
            .wrap(create_compression_middleware(enable_compression))
            .wrap(middleware::NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
