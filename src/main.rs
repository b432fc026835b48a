//! Process bootstrap: config, logging, storage selection, and serving

use anyhow::Result;
use taskdeck::config::AppConfig;
use taskdeck::server::{AppState, build_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskdeck=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "taskdeck listening");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &AppConfig) -> Result<AppState> {
    #[cfg(feature = "mongodb_backend")]
    if let Some(db) = &config.database {
        use std::sync::Arc;
        use taskdeck::entities::task::Task;
        use taskdeck::storage::mongodb::{MongoOwnedStore, MongoUserStore};

        let client = mongodb::Client::with_uri_str(&db.uri).await?;
        let database = client.database(&db.name);
        tracing::info!(database = %db.name, "using MongoDB storage backend");

        return Ok(AppState::new(
            Arc::new(MongoUserStore::new(database.clone())),
            Arc::new(MongoOwnedStore::<Task>::new(database)),
            &config.auth,
        ));
    }

    #[cfg(feature = "in-memory")]
    {
        if config.database.is_some() {
            tracing::warn!(
                "database configured but the mongodb_backend feature is disabled; \
                 falling back to in-memory storage"
            );
        }
        tracing::info!("using in-memory storage backend (data is not persisted)");
        return Ok(AppState::in_memory(&config.auth));
    }

    #[allow(unreachable_code)]
    {
        anyhow::bail!(
            "no storage backend available; enable the `in-memory` or `mongodb_backend` feature"
        )
    }
}
