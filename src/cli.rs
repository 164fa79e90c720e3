//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tag-crucible using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive explorer with the tagging panel (default)
//! - **scan**: Print a directory listing with tags
//! - **tag** / **untag**: Add or remove a tag on paths
//! - **tags**: Show own and inherited tags of a path
//! - **shorten**: Print the shortened display form of a path
//! - **config**: Show the configuration or its location

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tag-crucible")]
#[command(about = "A terminal file explorer for tagging files and folders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use an alternate configuration file
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Use an alternate tag database
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive explorer (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Directory to open (defaults to the working directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Scan depth below the opened directory
        #[arg(short = 'd', long = "depth", value_name = "N")]
        depth: Option<usize>,

        /// Pick the directory with a prompt before opening
        #[arg(short = 'p', long = "pick", conflicts_with = "path")]
        pick: bool,
    },

    /// Print the listing of a directory
    #[command(visible_alias = "s")]
    Scan {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        #[arg(short = 'd', long = "depth", value_name = "N")]
        depth: Option<usize>,

        /// Print rows as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Add a tag to one or more paths
    #[command(visible_alias = "t")]
    Tag {
        #[arg(value_name = "TAG")]
        tag: String,

        #[arg(value_name = "PATHS", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Remove a tag from one or more paths
    #[command(visible_alias = "u")]
    Untag {
        #[arg(value_name = "TAG")]
        tag: String,

        #[arg(value_name = "PATHS", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Show the tags of a path, or list every tag when no path is given
    Tags {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Print a path shortened for display
    Shorten {
        #[arg(value_name = "PATH")]
        path: String,

        /// Maximum length in characters (defaults to the configured width)
        #[arg(short = 'm', long = "max", value_name = "N")]
        max: Option<usize>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            path: None,
            depth: None,
            pick: false,
        })
    }
}
