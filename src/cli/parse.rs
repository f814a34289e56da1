//! CLI parse: clap types for MapQuery. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MapQuery CLI - Query-service framework for map applications
#[derive(Parser)]
#[command(name = "mapquery")]
#[command(about = "Pluggable query-service framework for map applications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage query services
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Dispatch a query through a registered service
    Query {
        /// Registered service name
        service: String,

        /// Field value as NAME=VALUE (repeatable, positionally aligned with
        /// the service's field specs)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Selection geometry as GeoJSON
        #[arg(long)]
        selection: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate configuration
    Validate,
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List registered services
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show service details
    Show {
        /// Registered service name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate a service definition
    Validate {
        /// Registered service name
        name: String,
    },
}
