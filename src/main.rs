use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use reef_index::config::{LogFormat, LoggingSettings, Settings};
use reef_index::core::ReefAnalyzer;
use reef_index::routes::{self, reef::AppState};
use reef_index::services::ObisClient;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; `RUST_LOG` takes precedence over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Reef Index service...");
    info!("Configuration loaded successfully");

    // Initialize OBIS client
    let obis = match ObisClient::new(
        settings.obis.endpoint.clone(),
        settings.obis.result_size,
        settings.obis.timeout(),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build OBIS client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    info!(
        "OBIS client initialized ({}, up to {} records per query)",
        settings.obis.endpoint, settings.obis.result_size
    );

    let analyzer = ReefAnalyzer::new(settings.grid.seed);

    match analyzer.seed() {
        Some(seed) => info!("Reef analyzer initialized with fixed seed {}", seed),
        None => info!("Reef analyzer initialized with entropy seeding"),
    }

    // Build application state
    let app_state = AppState { obis, analyzer };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
