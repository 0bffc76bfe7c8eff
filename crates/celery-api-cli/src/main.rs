//! CLI entry point - the composition root.
//!
//! Initializes logging, parses arguments and dispatches to handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use celery_api_cli::{Cli, CliError, Commands, ConfigCommand, CookbookCommand, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Internal(e.to_string()))?;
        return Ok(());
    };

    let config_path = cli.config.as_deref();

    match command {
        Commands::Serve { port } => handlers::serve::execute(config_path, port).await,
        Commands::Config {
            command: ConfigCommand::Show,
        } => {
            println!("{}", handlers::config::show(config_path)?);
            Ok(())
        }
        Commands::Cookbook { command } => match command {
            CookbookCommand::Check { paths } => handlers::cookbook::check(&paths),
            CookbookCommand::Show { path } => {
                println!("{}", handlers::cookbook::show(&path)?);
                Ok(())
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
