use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pillcare_application::{SessionAction, SessionUseCase};
use pillcare_core::PillcareError;
use pillcare_infrastructure::{ConfigService, FileSessionStore};
use pillcare_interaction::ApiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

/// Log filter variable, e.g. `PILLCARE_LOG=pillcare_interaction=debug`.
const LOG_ENV: &str = "PILLCARE_LOG";

#[derive(Parser)]
#[command(name = "pillcare")]
#[command(about = "PillCare 360 - manage treatments and medication alarms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List patients
    Patients,
    /// List medications (builtin catalog if the backend has none)
    Medications,
    /// Alarm helpers
    Alarms {
        #[command(subcommand)]
        action: AlarmsAction,
    },
    /// Create or edit treatments
    Treatment {
        #[command(subcommand)]
        action: TreatmentAction,
    },
}

#[derive(Subcommand)]
enum AlarmsAction {
    /// Print an evenly spaced daily schedule
    Generate {
        #[arg(long)]
        frequency: i32,
    },
}

#[derive(Subcommand)]
enum TreatmentAction {
    /// Create a treatment from a TOML draft
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Edit a treatment, optionally replacing its fields from a TOML draft
    Edit {
        id: i64,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Offline commands need neither config nor session
    if let Commands::Alarms {
        action: AlarmsAction::Generate { frequency },
    } = cli.command
    {
        return commands::alarms::generate(frequency).map_err(Into::into);
    }

    let config = ConfigService::new()
        .client_config()
        .context("Failed to load client configuration")?;
    let session = Arc::new(FileSessionStore::new_default().context("Failed to open session store")?);
    let client = ApiClient::from_config(&config, session).context("Failed to build API client")?;
    let usecase = SessionUseCase::new(client.clone());

    tracing::debug!("[Bootstrap] Using backend {}", config.normalized_base_url());

    let result = match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&usecase, &email, &password).await
        }
        Commands::Logout => {
            commands::session::logout(&usecase);
            Ok(())
        }
        Commands::Whoami => commands::session::whoami(&usecase).await,
        Commands::Patients => commands::reference::patients(&client).await,
        Commands::Medications => commands::reference::medications(&client).await,
        Commands::Alarms { .. } => Ok(()),
        Commands::Treatment { action } => match action {
            TreatmentAction::Create { file } => commands::treatment::create(&client, &file).await,
            TreatmentAction::Edit { id, file } => {
                commands::treatment::edit(&client, id, file.as_deref()).await
            }
        },
    };

    if let Err(e) = result {
        report(&usecase, &e);
        std::process::exit(1);
    }
    Ok(())
}

/// Applies the session policy and prints the error.
fn report(usecase: &SessionUseCase, error: &PillcareError) {
    match usecase.handle_error(error) {
        SessionAction::Reauthenticate => {
            eprintln!(
                "{}",
                "Your session has ended. Please log in: pillcare login --email <EMAIL> --password <PASSWORD>"
                    .yellow()
            );
        }
        SessionAction::None => {
            eprintln!("{}", format!("Error: {}", error).red());
        }
    }
}
