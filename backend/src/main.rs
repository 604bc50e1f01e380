use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rollcall_backend::{
    app::{build_router, build_store},
    config::Config,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        store_backend = ?config.store_backend,
        appwrite_endpoint = %config.appwrite_endpoint,
        appwrite_api_key = %mask_secret(&config.appwrite_api_key),
        admin_username = %config.admin_username,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        time_zone = %config.time_zone,
        absence_threshold = config.absence_threshold,
        rate_limit_enabled = config.rate_limit_enabled,
        "Loaded configuration from environment/.env"
    );

    let store = build_store(&config)?;
    let bind_addr = config.bind_addr.clone();
    let app = build_router(AppState::new(store, config))?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
