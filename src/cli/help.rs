//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{Commands, ServiceCommands};

/// Command name string for log events (e.g. "service.list", "query").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Service { command } => format!("service.{}", service_command_name(command)),
        Commands::Query { .. } => "query".to_string(),
        Commands::Validate => "validate".to_string(),
    }
}

pub fn service_command_name(command: &ServiceCommands) -> &'static str {
    match command {
        ServiceCommands::List { .. } => "list",
        ServiceCommands::Show { .. } => "show",
        ServiceCommands::Validate { .. } => "validate",
    }
}
