//! # CLI Module
//!
//! Command-line entry points for the course equivalency service.
//!
//! # Commands
//!
//! - `serve`: run the HTTP API
//! - `query`: one lookup against a dataset file, printed as JSON
//! - `filters`: filter option lists for a dataset file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DatasetArgs, QueryArgs, ServeArgs};
pub use commands::{filters, query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
