mod config;
mod main_lib;

use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    tracing::info!("Using GraphQL endpoint {}", config.graphql_url);
    run(config).await
}
