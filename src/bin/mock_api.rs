//! TaskFlow Mock API Server
//!
//! Run with: cargo run --bin taskflow-mock-api
//!
//! # Configuration
//!
//! Environment variables:
//! - `TASKFLOW_MOCK_HOST`: Host to bind to (default: 127.0.0.1)
//! - `TASKFLOW_MOCK_PORT`: Port to listen on (default: 8090)
//! - `TASKFLOW_MOCK_PRODUCTS`: Number of fixture products (default: 24)
//! - `TASKFLOW_LOG_LEVEL` / `RUST_LOG`: Log level (default: info)
//!
//! Point the CLI at it with `taskflow --api-url http://127.0.0.1:8090 ...`.

use taskflow::config::Config;
use taskflow::mock::{serve, Fixtures, MockState, FIXTURE_EMAIL, FIXTURE_PASSWORD};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    taskflow::logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting TaskFlow mock API v{}", env!("CARGO_PKG_VERSION"));

    let mut fixtures = Fixtures::default();
    if let Ok(count) = std::env::var("TASKFLOW_MOCK_PRODUCTS") {
        match count.parse() {
            Ok(n) => fixtures = fixtures.with_product_count(n),
            Err(e) => tracing::warn!("Ignoring TASKFLOW_MOCK_PRODUCTS={:?}: {}", count, e),
        }
    }

    tracing::info!(
        "Fixture account: {} / {} ({} products, {} users)",
        FIXTURE_EMAIL,
        FIXTURE_PASSWORD,
        fixtures.products.len(),
        fixtures.users.len()
    );

    serve(MockState::new(fixtures), &config.mock).await?;
    Ok(())
}
