//! Command-line interface: argument parsing (`args`) and handlers
//! (`commands`).

pub mod args;
pub mod commands;

pub use args::{parse_args, Cli, Commands, OutputFormat};
pub use commands::{handle_generate_command, handle_schema_command, GenerateOptions};
