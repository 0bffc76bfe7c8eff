//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Publish Celery tasks over HTTP and validate the provisioning cookbooks.
#[derive(Parser)]
#[command(name = "celery-api")]
#[command(about = "HTTP API for Celery task creation")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON config file (defaults apply when absent)
    #[arg(long, global = true, env = "CELERY_API_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ConfigCommand, CookbookCommand};
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["celery-api", "--verbose", "--config", "/tmp/c.json", "serve"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(cli.command, Some(Commands::Serve { port: None })));
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::parse_from(["celery-api", "serve", "--port", "9090"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(9090) })));
    }

    #[test]
    fn test_cookbook_check_takes_many_paths() {
        let cli = Cli::parse_from(["celery-api", "cookbook", "check", "a", "b"]);
        let Some(Commands::Cookbook {
            command: CookbookCommand::Check { paths },
        }) = cli.command
        else {
            panic!("expected cookbook check");
        };
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn test_cookbook_check_requires_a_path() {
        assert!(Cli::try_parse_from(["celery-api", "cookbook", "check"]).is_err());
    }

    #[test]
    fn test_config_show_with_global_config_after_subcommand() {
        let cli = Cli::parse_from(["celery-api", "config", "show", "--config", "x.json"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::Show
            })
        ));
        assert_eq!(cli.config, Some(PathBuf::from("x.json")));
    }
}
