//! SkyPost Pro command-line shell
//!
//! Drives the Pro panel controller against a JSON data file and the
//! license service.
//!
//! Usage:
//!   skypost-pro status
//!   skypost-pro activate SKY-XXXX-XXXX
//!   skypost-pro backup ./backups
//!   skypost-pro delete-all --confirm --type YES

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use skypost_pro::adapters::{
    JsonFileStore, LicenseApiClient, LicenseApiConfig, LoggingTabOpener, NoLinkedSession,
};
use skypost_pro::application::controller::ControllerOutcome;
use skypost_pro::application::{AppContext, AppServices};
use skypost_pro::config::AppConfig;
use skypost_pro::domain::account::{DELETION_PROMPT, DELETION_WARNING};
use skypost_pro::domain::license::{AccessResult, LicenseError};
use skypost_pro::ports::ServiceError;

#[derive(Parser, Debug)]
#[command(name = "skypost-pro")]
#[command(about = "Manage the SkyPost Pro license and your data")]
struct Cli {
    /// Data file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// License service base URL to use instead of the configured one
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the Pro panel
    Status,
    /// List features, or check one by id
    Features {
        #[arg(long)]
        check: Option<String>,
    },
    /// Activate a license key
    Activate { key: String },
    /// Remove the stored license
    Deactivate,
    /// Open a checkout page to buy Pro
    Checkout { email: String },
    /// Write a backup file (Pro)
    Backup {
        #[arg(default_value = ".")]
        destination: PathBuf,
    },
    /// Show what a backup file contains (Pro)
    Preview { file: PathBuf },
    /// Replace notes and settings from a backup file (Pro)
    Restore {
        file: PathBuf,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Delete all data and remove the license (Pro)
    DeleteAll {
        /// Answer yes to the warning
        #[arg(long)]
        confirm: bool,
        /// Text typed at the confirmation prompt
        #[arg(long = "type", value_name = "TEXT")]
        typed: Option<String>,
    },
}

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] skypost_pro::config::ConfigError),

    #[error("Could not create license service client: {0}")]
    Client(#[from] ServiceError),

    #[error("Could not load license: {0}")]
    License(#[from] LicenseError),
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, StartupError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = &cli.data_file {
        config.storage.data_file = path.clone();
    }
    if let Some(url) = &cli.api_url {
        config.service.base_url = url.clone();
    }
    config
        .validate()
        .map_err(skypost_pro::config::ConfigError::from)?;
    Ok(config)
}

/// The wired application plus the tab opener, whose URLs the shell prints.
struct Shell {
    context: AppContext,
    tabs: LoggingTabOpener,
}

async fn build_shell(config: &AppConfig) -> Result<Shell, StartupError> {
    let client = Arc::new(LicenseApiClient::new(
        LicenseApiConfig::default()
            .with_base_url(config.service.base_url.clone())
            .with_timeout(config.service.timeout()),
    )?);

    let tabs = LoggingTabOpener::new();
    let services = AppServices {
        store: Arc::new(JsonFileStore::new(&config.storage.data_file)),
        verifier: client.clone(),
        checkout: client,
        tabs: Arc::new(tabs.clone()),
        linked_session: Arc::new(NoLinkedSession),
    };

    Ok(Shell {
        context: AppContext::initialize(services).await?,
        tabs,
    })
}

fn report(outcome: ControllerOutcome) -> ExitCode {
    match outcome {
        ControllerOutcome::Completed { message } => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        ControllerOutcome::Failed { message } => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
        ControllerOutcome::Cancelled { reason } => {
            println!("{}", reason);
            ExitCode::from(2)
        }
        ControllerOutcome::NeedsConfirmation { message } => {
            println!("{}", message);
            ExitCode::from(2)
        }
    }
}

async fn restore(context: &AppContext, file: &Path, yes: bool) -> ExitCode {
    let controller = context.controller();
    let message = match controller.preview_restore(file).await {
        ControllerOutcome::NeedsConfirmation { message } => message,
        other => return report(other),
    };

    println!("{}", message);
    if !yes {
        println!("\nRe-run with --yes to restore.");
        return ExitCode::from(2);
    }

    report(
        controller
            .restore(file, true, |step| eprintln!("{}", step))
            .await,
    )
}

async fn run(command: Command, shell: &Shell) -> ExitCode {
    let context = &shell.context;
    let controller = context.controller();
    match command {
        Command::Status => {
            println!("{}", controller.render());
            if let Some(expires_at) = context.entitlements().status().expires_at {
                println!("\nLicense expiry: {}", expires_at.display_date());
            }
            ExitCode::SUCCESS
        }
        Command::Features { check: Some(id) } => match context.entitlements().check_feature(&id)
        {
            AccessResult::Allowed => {
                println!("{}: available", id);
                ExitCode::SUCCESS
            }
            AccessResult::Denied(reason) => {
                println!("{}", reason.user_message());
                ExitCode::FAILURE
            }
        },
        Command::Features { check: None } => {
            let table = context.entitlements().get_feature_list();
            for feature in table.iter() {
                match feature.limit {
                    Some(limit) => println!(
                        "{:<5} {} ({})",
                        feature.tier.display_name(),
                        feature.name,
                        limit
                    ),
                    None => println!("{:<5} {}", feature.tier.display_name(), feature.name),
                }
            }
            ExitCode::SUCCESS
        }
        Command::Activate { key } => report(controller.activate(Some(&key)).await),
        Command::Deactivate => {
            context.entitlements().deactivate_license().await;
            println!("License removed.");
            ExitCode::SUCCESS
        }
        Command::Checkout { email } => {
            let outcome = controller.start_checkout(Some(&email)).await;
            if outcome.is_completed() {
                for url in shell.tabs.opened() {
                    println!("{}", url);
                }
            }
            report(outcome)
        }
        Command::Backup { destination } => report(controller.backup(&destination).await),
        Command::Preview { file } => report(controller.preview_restore(&file).await),
        Command::Restore { file, yes } => restore(context, &file, yes).await,
        Command::DeleteAll { confirm, typed } => {
            println!("{}\n", DELETION_WARNING);
            if confirm && typed.is_none() {
                println!("{} (pass --type YES)", DELETION_PROMPT);
            }
            report(controller.delete_all_data(confirm, typed.as_deref()).await)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.runtime.log_level);

    let shell = match build_shell(&config).await {
        Ok(shell) => shell,
        Err(err) => {
            tracing::error!(error = %err, "Startup failed");
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    run(cli.command, &shell).await
}
