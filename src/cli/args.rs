//! CLI argument definitions using clap
//!
//! Commands:
//! - strindex init --config <path>
//! - strindex serve --config <path> [--port <port>]
//! - strindex analyze <value>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./strindex.json";

/// strindex - analyze, store and query strings
#[derive(Parser, Debug)]
#[command(name = "strindex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Load the store and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the derived record for a value without storing it
    Analyze {
        /// The string to analyze
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["strindex", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["strindex", "analyze", "Race car"]).unwrap();
        assert!(matches!(cli.command, Command::Analyze { ref value } if value == "Race car"));
    }

    #[test]
    fn test_analyze_requires_value() {
        assert!(Cli::try_parse_from(["strindex", "analyze"]).is_err());
    }
}
