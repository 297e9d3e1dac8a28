use chffr_backend::{
    config::{get_config, init_config},
    database::{pool::create_pool, schema::ensure_schema},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chffr_backend=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    for (provider, client_id) in [
        ("google", &config.google_client_id),
        ("github", &config.github_client_id),
    ] {
        if client_id.is_empty() {
            warn!(provider, "OAuth client id not configured; login redirects will be rejected by the provider");
        }
    }

    if config.public_base_url.is_none() && !config.trust_forwarded_headers {
        warn!("PUBLIC_BASE_URL not set; OAuth redirect_uri origin comes from the request Host header");
    }

    info!(database_url = %config.database_url, "Opening database");
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    let app = routes::router(AppState::new(pool, config));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("chffr backend listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
