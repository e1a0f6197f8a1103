use std::{process, sync::Arc};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use portfolio_contact::{
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    store::sanity::SanityContentStore,
    web::cors::cors_headers,
    AppState, SharedContentStore,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let store: Option<SharedContentStore> = match config.store_credentials() {
        Some(credentials) => match SanityContentStore::new(&credentials) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                tracing::error!("Content store setup error: {}", e);
                process::exit(1);
            }
        },
        None => {
            tracing::warn!(
                "Missing content store credentials (SANITY_PROJECT_ID, SANITY_TOKEN). \
                 Contact form submissions will NOT be saved."
            );
            None
        }
    };

    let app_state = web::Data::new(AppState::new(&config, store));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let allow_origin = config.cors_origin();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(cors_headers(&allow_origin))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
