use anyhow::{Context, Result};
use relay::api::ApiClient;
use relay::auth::{FileStore, SessionController, TokenStore};
use relay::cli::commands::{self, CliNavigator};
use relay::cli::output::Output;
use relay::cli::{Cli, Commands};
use relay::utils::toml_config::RelayConfig;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let config = RelayConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    // RUST_LOG wins over the configured level; --verbose forces debug for this crate.
    let default_filter = if cli.verbose {
        "relay=debug".to_string()
    } else {
        format!("relay={},warn", config.logging.level)
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let session_file = FileStore::open(&config.storage.session_file)?;
    let preferences_file = FileStore::open(&config.storage.preferences_file)?;
    debug!(
        session = %session_file.path().display(),
        preferences = %preferences_file.path().display(),
        "Opened stores"
    );

    let session = Arc::new(SessionController::new(
        TokenStore::new(Arc::new(session_file), Arc::new(preferences_file)),
        Arc::new(CliNavigator::new(output)),
    ));
    session.bootstrap();

    let api = ApiClient::from_config(&config, session)?;

    if cli.verbose {
        output.banner();
    }

    match cli.command {
        None | Some(Commands::Status) => commands::status(&api, &output)?,
        Some(Commands::Login { email, password }) => {
            commands::login(&api, &output, email, password).await?
        }
        Some(Commands::Logout) => commands::logout(&api, &output)?,
        Some(Commands::Signup { name, email }) => {
            commands::signup(&api, &output, name, email).await?
        }
        Some(Commands::ForgotPassword { email }) => {
            commands::forgot_password(&api, &output, email).await?
        }
        Some(Commands::Users { filter }) => commands::users(&api, &output, &filter).await?,
        Some(Commands::Decode { token }) => commands::decode(&api, &output, token)?,
        Some(Commands::Theme { value }) => commands::theme(&api, &output, value)?,
        Some(Commands::Config { validate }) => {
            commands::config(&config, &cli.config, &output, validate)?
        }
    }

    Ok(())
}
