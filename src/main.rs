use std::sync::Arc;
use std::time::Duration;

use blog_console::backend::HttpBackend;
use blog_console::config::Config;
use blog_console::routes;
use blog_console::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("invalid configuration");
    let backend = HttpBackend::new(&config.backend_base_url, Duration::from_secs(config.connect_timeout_secs))
        .expect("backend client init failed");
    tracing::info!(backend = %backend.base_url(), "backend client initialized");

    if config.cdn_base_url.is_none() {
        tracing::warn!("CDN_BASE_URL not set; relative image paths will not resolve");
    }
    if !config.static_dir.is_dir() {
        tracing::warn!(dir = %config.static_dir.display(), "static directory missing; console pages will 404");
    }

    let addr = config.listen_addr();
    let state = AppState::new(config, Arc::new(backend));
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "blog console listening");
    axum::serve(listener, app).await.expect("server failed");
}
