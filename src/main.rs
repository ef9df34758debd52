use clap::Parser;
use fixture_feed::utils::{logger, validation::Validate};
use fixture_feed::{AppConfig, AppState, CliConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(config.verbose, config.json_logs);
    tracing::info!("Starting fixture-feed");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(&config.bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    fixture_feed::serve(listener, state).await?;
    Ok(())
}
