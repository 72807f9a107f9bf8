mod cli;
mod commands;
mod session;

use ambience_common::ConfigError;
use ambience_config::schema::AmbienceConfig;
use ambience_config::{toml_loader, validation};
use tracing_subscriber::EnvFilter;

fn load_config(args: &cli::Args) -> Result<AmbienceConfig, ConfigError> {
    match &args.config {
        Some(path) => {
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => ambience_config::load_config(),
    }
}

fn main() {
    let args = cli::parse();

    // Loaded before logging starts so `[logging] level` can seed the filter.
    let loaded = load_config(&args);
    let config_level = loaded
        .as_ref()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "info".into());

    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("ambience={config_level}"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::debug!("ambience v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AmbienceConfig::default()
    });

    let session = match session::Session::open(&config, args.store.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to open preference store: {e}");
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::execute(&args.command, &session, &mut stdout) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
