use std::sync::Arc;

use todos_rpc::{
    build_app, config::Config, logging, seed::load_seed, store::InMemoryTodoStore, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let seed = load_seed(&config.data_path).await?;
    info!(
        path = %config.data_path.display(),
        todos = seed.len(),
        "seed data loaded"
    );

    let store = Arc::new(InMemoryTodoStore::from_seed(seed)?);
    let state = AppState::new(store);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_socket()?).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server listening"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
