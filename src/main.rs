use std::sync::Arc;

use actix_files as fs;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tourlens::config::Config;
use tourlens::provider::AnthropicClient;
use tourlens::routes::{self, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tourlens=debug")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let provider = AnthropicClient::new(config.provider.clone())
        .context("Failed to create HTTP client")?;

    let state = web::Data::new(AppState {
        provider: Arc::new(provider),
        max_tokens: config.provider.max_tokens,
    });
    let static_dir = config.static_dir.clone();

    tracing::info!(
        bind = %config.bind_addr,
        model = %config.provider.model,
        static_dir = %static_dir,
        "tourlens server starting"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(routes::json_config())
            .wrap(routes::cors())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .service(fs::Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("Failed to bind {}", config.bind_addr))?
    .run()
    .await
    .context("Server error")
}
