use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::{AppConfig, StorageBackend, StorageConfig};
use service::{
    coffee::{CoffeeRepository, InMemoryCoffeeRepository, JsonFileCoffeeRepository},
    runtime,
};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the configured backing.
pub async fn open_repository(storage: &StorageConfig) -> anyhow::Result<Arc<dyn CoffeeRepository>> {
    let repo: Arc<dyn CoffeeRepository> = match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryCoffeeRepository::new()),
        StorageBackend::Json => {
            runtime::ensure_storage_dir(&storage.path).await?;
            let repo = JsonFileCoffeeRepository::open(&storage.path).await?;
            info!(path = %repo.path().display(), "opened json coffee store");
            Arc::new(repo)
        }
    };
    Ok(repo)
}

/// Open storage, seed it, and assemble the handler state.
///
/// An in-memory backing is always seeded; a durable one only when empty.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let repo = open_repository(&cfg.storage).await?;
    let state = ServerState::new(repo, cfg.greeting.clone(), cfg.droid.clone());
    let seed = cfg.storage.seed.iter().cloned();
    let seeded = match cfg.storage.backend {
        StorageBackend::Memory => state.coffees.initialize(seed).await?.len(),
        StorageBackend::Json => state.coffees.initialize_if_empty(seed).await?,
    };
    info!(seeded, backend = ?cfg.storage.backend, "coffee store ready");
    Ok(state)
}

pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve `state` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = app(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: load config, build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting coffee server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received; draining connections");
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_state_is_seeded_with_defaults() -> anyhow::Result<()> {
        let cfg = AppConfig::default();
        let state = build_state(&cfg).await?;
        let names: Vec<_> = state.coffees.list_all().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, configs::DEFAULT_SEED);
        Ok(())
    }

    #[test]
    fn bind_addr_uses_server_section() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg)?.port(), 9090);
        Ok(())
    }
}
