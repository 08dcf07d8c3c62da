pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod search_log;
pub mod services;
pub mod state;

use std::io::IsTerminal;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Commands, cmd_bootstrap_catalog, cmd_genres, cmd_init, cmd_menu, cmd_popular,
    cmd_recent, cmd_search_genre, cmd_search_title,
};
pub use config::Config;
use services::StatisticsReporter;
use state::{SharedState, open_log_store};

fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // Menu and results own stdout.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub async fn run() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_env_overrides();
    config.validate()?;

    init_tracing(&config);
    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let json = cli.json;
    let color = !json && !cli.no_color && std::io::stdout().is_terminal();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Init => cmd_init(),

        Commands::BootstrapCatalog => cmd_bootstrap_catalog(&config).await,

        Commands::Popular { limit } => {
            let reporter = stats_reporter(&config).await;
            cmd_popular(&reporter, limit, json, color).await
        }

        Commands::Recent { limit } => {
            let reporter = stats_reporter(&config).await;
            cmd_recent(&reporter, limit, json, color).await
        }

        Commands::Genres => {
            let state = SharedState::new(config).await?;
            cmd_genres(&state.search, json, color).await
        }

        Commands::Title { text, page } => {
            let state = SharedState::new(config).await?;
            cmd_search_title(&state.search, &text.join(" "), page, json, color).await
        }

        Commands::Genre {
            genre,
            from,
            to,
            page,
        } => {
            let state = SharedState::new(config).await?;
            cmd_search_genre(&state.search, &genre, from, to, page, json, color).await
        }

        Commands::Menu => {
            let state = SharedState::new(config).await?;
            cmd_menu(&state.search, &state.statistics, color).await?;
            info!("Session ended");
            Ok(())
        }
    }
}

/// Statistics only need the log store, not the catalog.
async fn stats_reporter(config: &Config) -> StatisticsReporter {
    let store = open_log_store(config).await;
    StatisticsReporter::new(store, config.statistics.top_n)
}
