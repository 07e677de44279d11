mod context;
mod generate;
mod invoices;
mod posters;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::{context::AppContext, invoices::InvoiceCommands, posters::PostersCommands};

#[derive(Debug, Parser)]
#[command(name = "adcraft")]
#[command(about = "Marketing copy and invoices for small businesses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate poster content for a business profile
    Generate {
        /// Path to a YAML or JSON business profile
        #[arg(long)]
        profile: PathBuf,
        #[arg(long, env = "ADCRAFT_OWNER_ID")]
        owner: Option<Uuid>,
        /// Store the poster and record a `generated` event
        #[arg(long, requires = "owner")]
        save: bool,
    },
    /// Manage stored posters
    Posters {
        #[command(subcommand)]
        command: PostersCommands,
    },
    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(generate::exit_status(&err))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = adcraft_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = AppContext::init(config)?;
    tracing::debug!(env = %ctx.config.env, provider = %ctx.config.llm_provider, "adcraft starting");

    match cli.command {
        Commands::Generate {
            profile,
            owner,
            save,
        } => generate::run_generate(&ctx, &profile, owner, save).await,
        Commands::Posters { command } => posters::run_posters(&ctx, command).await,
        Commands::Invoice { command } => invoices::run_invoice(&ctx, command).await,
        Commands::Ping => {
            adcraft_db::health_check(ctx.pool().await?).await?;
            println!("database ok");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
