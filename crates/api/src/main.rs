use anyhow::Context;
use shopcart_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    shopcart_observability::init(config.log_format);

    let store = if config.seed {
        app::services::seeded_store().context("failed to seed demo data")?
    } else {
        app::services::empty_store()
    };
    let app = app::build_app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
