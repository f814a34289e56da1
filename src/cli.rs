//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, service_command_name};
pub use output::map_error;
pub use parse::{Cli, Commands, ServiceCommands};
pub use presentation::{
    format_query_result_json, format_query_result_text, format_service_list_json,
    format_service_list_text, format_service_show_json, format_service_show_text,
    format_validation_result, ServiceRow,
};
pub use route::RunContext;
