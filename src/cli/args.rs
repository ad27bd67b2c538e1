//! CLI argument definitions using clap
//!
//! Commands:
//! - quorum init --config <path>
//! - quorum exec --config <path>
//! - quorum serve --config <path>
//! - quorum whoami --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quorum - anonymous questions, answers and votes on local storage
#[derive(Parser, Debug)]
#[command(name = "quorum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./quorum.json")]
        config: PathBuf,
    },

    /// Execute one JSON request from stdin and exit
    Exec {
        /// Path to configuration file
        #[arg(long, default_value = "./quorum.json")]
        config: PathBuf,
    },

    /// Answer line-delimited JSON requests until stdin closes
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./quorum.json")]
        config: PathBuf,
    },

    /// Print this client's anonymous identity, creating it if needed
    Whoami {
        /// Path to configuration file
        #[arg(long, default_value = "./quorum.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["quorum", "whoami"]).unwrap();
        match cli.command {
            Command::Whoami { config } => assert_eq!(config, PathBuf::from("./quorum.json")),
            other => panic!("Expected Whoami, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from(["quorum", "serve", "--config", "/etc/q.json"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { config } if config == PathBuf::from("/etc/q.json")));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["quorum", "start"]).is_err());
    }
}
