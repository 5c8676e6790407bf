use clap::arg;
use clap::command;
use clap::Parser;
use anyhow::Result;
use token_validator::cache::validation_cache::ValidationCache;
use token_validator::observability::service_resources_metrics::collect_process_metrics;
use token_validator::oracle::http::HttpOracle;
use token_validator::server;
use token_validator::store::build_store;
use token_validator::utils::config_loader;
use token_validator::utils::constants::DEFAULT_CONFIG_PATH;
use token_validator::utils::logging;
use token_validator::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Record store
    // -------------------------------

    let store = build_store(&service_config.store).await?;
    info!("record store '{}' ready", store.name());

    // -------------------------------
    // 3. Validation oracle
    // -------------------------------

    let oracle = HttpOracle::new(service_config.oracle.to_owned())?;
    info!("validation oracle at {}", oracle.url());

    // -------------------------------
    // 4. Serve validation + metrics
    // -------------------------------

    let cache = ValidationCache::new(store, oracle);
    let http_server = server::server::start(&service_config.settings, cache);

    let service_metrics = collect_process_metrics(service_config.settings.metrics.is_enabled);
    info!("Service starting...");
    tokio::try_join!(http_server, service_metrics)?;

    Ok(())
}
