use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use homestead::application::{AppState, BootstrapSessionUseCase, LoginUseCase};
use homestead::domain::ports::StoragePort;
use homestead::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, ConfigSource, FileStorage, HttpAuthClient, SessionCookieJar,
};
use homestead::presentation::CommandRunner;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, ConfigSource)> {
    let (mut config, source) = ConfigLoader::new().load(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, source))
}

fn open_storage(config: &AppConfig) -> Option<Arc<dyn StoragePort>> {
    let path = config.effective_storage_path()?;
    match FileStorage::open(&path) {
        Ok(storage) => Some(Arc::new(storage)),
        Err(e) => {
            warn!(error = %e, "Durable storage unavailable, keeping state in memory");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, source) = load_config(&args)?;
    init_logging(&config)?;

    info!(version = homestead::VERSION, config = %source, "Starting homestead");

    let storage = open_storage(&config);

    let jar = Arc::new(SessionCookieJar::new(storage.clone()));
    let mut auth_client =
        HttpAuthClient::with_cookie_jar(&config.api_base_url, config.request_timeout(), jar)?;
    if let Some(token) = &config.auth_token {
        auth_client = auth_client.with_bearer_token(token);
    }
    let auth_client = Arc::new(auth_client);

    let mut state = AppState::new(storage);
    state.hydrate();

    let outcome = BootstrapSessionUseCase::new(auth_client.clone())
        .with_timeout(config.session_timeout())
        .execute(&mut state.identity)
        .await;
    info!(%outcome, "Session bootstrap finished");

    let runner = CommandRunner::new(LoginUseCase::new(auth_client));
    runner
        .run(args.command, &mut state, &outcome, &mut io::stdout().lock())
        .await
}
