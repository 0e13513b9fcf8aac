mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use newsmem::logging::{init_logging, LoggingConfig};
use newsmem::{Config, Error};

use output::{print_json, ErrorResponse};

/// newsmem - A semantic memory store for RSS news articles
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    init_logging(&LoggingConfig::from_env(cli.verbose))?;

    let config = Config::load()?;
    config.ensure_directories()?;

    commands::execute(&cli.command, &config, cli.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::Commands;

    #[test]
    fn test_cli_parsing_search() {
        let cli = Cli::parse_from(["newsmem", "search", "open models", "--important", "-l", "5"]);
        match cli.command {
            Commands::Search {
                query,
                important,
                limit,
            } => {
                assert_eq!(query, "open models");
                assert!(important);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search command"),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["newsmem", "list", "--json", "-v"]);
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List { important: false }));
    }

    #[test]
    fn test_cli_parsing_ingest() {
        let cli = Cli::parse_from(["newsmem", "ingest", "feed.json", "--no-cleanup"]);
        match cli.command {
            Commands::Ingest { file, no_cleanup } => {
                assert_eq!(file, std::path::PathBuf::from("feed.json"));
                assert!(no_cleanup);
            }
            _ => panic!("expected ingest command"),
        }
    }

    #[test]
    fn test_cli_parsing_cleanup_days() {
        let cli = Cli::parse_from(["newsmem", "cleanup", "--days", "30"]);
        assert!(matches!(cli.command, Commands::Cleanup { days: Some(30) }));
    }

    #[test]
    fn test_cli_parsing_id() {
        let cli = Cli::parse_from([
            "newsmem",
            "id",
            "--title",
            "Test",
            "--url",
            "https://example.com",
            "--published-at",
            "2024-05-01T12:30:00+00:00",
        ]);
        match cli.command {
            Commands::Id {
                title,
                url,
                published_at,
            } => {
                assert_eq!(title, "Test");
                assert_eq!(url, "https://example.com");
                assert_eq!(published_at.as_deref(), Some("2024-05-01T12:30:00+00:00"));
            }
            _ => panic!("expected id command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["newsmem"]).is_err());
    }
}
