use std::sync::Arc;

use clap::Parser;
use reqwest::Client;
use processual_agent::cache::token_store::FileTokenStore;
use processual_agent::query::dispatcher::QueryDispatcher;
use processual_agent::server;
use processual_agent::sources::auth::PredictusAuth;
use processual_agent::sources::token_manager::TokenManager;
use processual_agent::utils::config_loader;
use processual_agent::utils::logging;
use anyhow::Result;
use processual_agent::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "processual-agent.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level).await?;

    // -------------------------------
    // 2. Create request client
    // -------------------------------

    let client = Client::builder().build()?;
    let upstream = Arc::new(service_config.upstream.clone());

    // -------------------------------
    // 3. Token slot + upstream login
    // -------------------------------

    let store = FileTokenStore::new(&service_config.token_cache.path);
    let auth = PredictusAuth::new(client.clone(), upstream.clone());
    let tokens = Arc::new(TokenManager::new(store, auth, service_config.token_cache.clone()));
    info!("token cache at '{}'", service_config.token_cache.path);

    // -------------------------------
    // 4. Query dispatcher + http server
    // -------------------------------

    let dispatcher = Arc::new(QueryDispatcher::new(client, upstream, tokens));
    info!("Service starting...");
    server::server::start(&service_config.settings, dispatcher).await?;

    info!("Service stopped");
    Ok(())
}
