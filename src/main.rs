#![warn(clippy::all)]

use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

use trivia_api::config::Config;
use trivia_api::routes::RouteOptions;
use trivia_api::store::{MemoryStore, PgStore, SharedStore};
use trivia_api::types::category::CategoryId;

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = Config::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        // 각 범위가 닫힐 때 이벤트를 기록한다.
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store: SharedStore = if config.in_memory {
        tracing::info!("serving from the in-memory store");
        Arc::new(MemoryStore::seeded()?)
    } else {
        let store = PgStore::new(&config.database_url()).await?;
        store.run_migrations().await?;
        Arc::new(store)
    };

    let options = RouteOptions {
        default_category: config.default_category.map(CategoryId),
        quiz_order: config.quiz_order,
    };

    tracing::info!(host = %config.host, port = config.port, "trivia api starting");
    warp::serve(trivia_api::build_routes(store, options))
        .run((config.host, config.port))
        .await;

    Ok(())
}
