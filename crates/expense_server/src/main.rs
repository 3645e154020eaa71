use anyhow::Context;
use expense_core::{init_logging, seed_if_empty, Store, UnitOfWork};
use expense_server::cors::cors_layer;
use expense_server::{router, AppState, DatabaseTarget, Settings};
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings.log_level, settings.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let store = match &settings.database {
        DatabaseTarget::File(path) => Store::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?,
        DatabaseTarget::Memory => Store::open_in_memory()?,
    };
    let uow = UnitOfWork::new(Arc::new(store));
    let seeded = uow.run(seed_if_empty)?;
    info!("event=startup module=server status=ready seeded={seeded}");

    let app = router(AppState::new(uow)).layer(cors_layer(&settings.cors_origins)?);
    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(
        "event=listen module=server status=ok addr={}",
        settings.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=shutdown module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("event=shutdown module=server status=error reason=signal_handler");
    }
}
