use tracing_subscriber::EnvFilter;

use wordmask_server::build_app;
use wordmask_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("WORDMASK_LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Wordmask server starting");

    let config = ServerConfig::load();
    config.validate();
    let addr = config.listen_addr.clone();
    let (app, _state) = build_app(config);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind listen address");
            std::process::exit(1);
        },
    };
    tracing::info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server stopped with an error");
        std::process::exit(1);
    }
}
