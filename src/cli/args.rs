//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::devexp::Language;
use crate::request::SecretString;

#[derive(Parser, Debug)]
#[command(name = "hrbridge", version, about, long_about = None)]
#[command(
    after_help = "Saved configurations can be referred to by id or by name.\n\
                  Run `hrbridge wizard` to build one step by step."
)]
pub struct Args {
    /// ZenHR API key (overrides [hr] api_key from the config file)
    #[arg(long = "api-key", env = "HRBRIDGE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<SecretString>,

    /// Saved configuration file (default: <config dir>/configurations.json)
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Log state transitions to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,

    /// Output format for logs: text (default) or json (JSON Lines)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Force disable colors in output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the HR API endpoints
    Endpoints,

    /// List the fields of an HR endpoint
    Fields {
        endpoint: String,

        /// Only fields whose id, name or description contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,

        /// Only fields of one category
        #[arg(long)]
        category: Option<String>,

        /// Print CSV instead of a table (readable by import-fields)
        #[arg(long, action = ArgAction::SetTrue)]
        csv: bool,
    },

    /// List the query filters of an HR endpoint
    Filters { endpoint: String },

    /// Manage saved configurations
    Configs {
        #[command(subcommand)]
        action: ConfigsCommand,
    },

    /// Show the review page of a saved configuration
    Render {
        id: String,

        /// Snippet language; repeat for several (default: all)
        #[arg(short = 'l', long = "language", value_name = "LANG")]
        languages: Vec<Language>,

        /// Show the API key and external credentials unmasked
        #[arg(long = "show-secrets", action = ArgAction::SetTrue)]
        show_secrets: bool,

        /// Write the unmasked request JSON to PATH
        #[arg(long, value_name = "PATH")]
        copy: Option<PathBuf>,

        /// Print the rendered review as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Send a simulated test request for a saved configuration
    Test {
        id: String,

        /// RNG seed for a reproducible outcome
        #[arg(long)]
        seed: Option<u64>,

        /// Override the simulated delay
        #[arg(long = "delay-ms", value_name = "MS")]
        delay_ms: Option<u64>,

        /// Test the external system connection instead of the HR request
        #[arg(long, action = ArgAction::SetTrue)]
        connection: bool,

        /// With --connection: store the discovered external fields
        #[arg(long, action = ArgAction::SetTrue, requires = "connection")]
        discover: bool,
    },

    /// Import external fields from a JSON list or a CSV file
    ImportFields {
        file: PathBuf,

        /// Append the imported fields to this saved configuration
        #[arg(long, value_name = "ID")]
        into: Option<String>,
    },

    /// Build a configuration interactively
    Wizard {
        /// Start from a saved configuration
        #[arg(long, value_name = "ID")]
        from: Option<String>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigsCommand {
    /// List saved configurations
    List,

    /// Show one saved configuration
    Show {
        id: String,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Write a saved configuration to a file
    Export { id: String, path: PathBuf },

    /// Add a configuration from a file
    Import { path: PathBuf },

    /// Delete a saved configuration
    Delete { id: String },
}

/// Shell types for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Log format for structured output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
