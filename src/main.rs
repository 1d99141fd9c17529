use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tokio::signal;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use auris_contact_api::{
    captcha::recaptcha::RecaptchaVerifier, cors::CorsPolicy,
    delivery::http_gateway::HttpDeliveryGateway, routes::configure_routes, settings::AppConfig,
    ProdAppState,
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
            std::process::exit(1);
        }
    };

    let state = match ProdAppState::new(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Startup error: {:#}", e);
            std::process::exit(1);
        }
    };
    let cors = web::Data::new(CorsPolicy::new(config.cors_origins()));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(cors.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .configure(configure_routes::<HttpDeliveryGateway, RecaptchaVerifier>)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to listen for SIGTERM");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("🛑 Ctrl+C received, shutting down contact API...")
        },
        _ = terminate => {
            tracing::warn!("🛑 SIGTERM received, shutting down contact API...");
        }
    }
}
