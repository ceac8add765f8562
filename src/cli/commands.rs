//! CLI command implementations
//!
//! `serve` boots the HTTP API. `query` and `filters` load the dataset once,
//! print the result and exit; unlike the server they fail loudly when the
//! dataset cannot be read.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::crypto::generate_token;
use crate::auth::AdminAuth;
use crate::catalog::{CourseSource, FileSource};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::observability::{init_logging, LogFormat};
use crate::query::{find_courses, CourseQuery, FilterOptions};

use super::args::{Cli, Command, DatasetArgs, QueryArgs, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(args),
        Command::Query { dataset, query: args } => query(dataset, args),
        Command::Filters { dataset } => filters(dataset),
    }
}

/// Start the HTTP API and block until shutdown
pub fn serve(args: ServeArgs) -> CliResult<()> {
    init_logging(args.log_format.unwrap_or(args.environment.log_format()));

    let server = build_server(args)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server error: {}", e)))
}

/// Wire auth, dataset and router from the serve options
fn build_server(args: ServeArgs) -> CliResult<HttpServer> {
    if args.max_upload_bytes == 0 {
        return Err(CliError::config_error("MAX_UPLOAD_BYTES must be greater than zero"));
    }

    let token = match args.auth_token.filter(|t| !t.trim().is_empty()) {
        Some(token) => token,
        None => {
            warn!("AUTH_TOKEN not set, generated an admin token for this process only");
            generate_token()
        }
    };

    let auth = AdminAuth::new(token, args.admin_username, args.admin_password.as_deref())
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let source = Arc::new(FileSource::new(args.dataset.paths));
    let state = AppState::new(source, auth)
        .with_persist_uploads(args.persist_uploads)
        .shared();

    // Load up front so the first request does not pay for parsing
    let courses = state.catalog.snapshot().len();
    info!(courses, "course catalog ready");

    let config = HttpServerConfig {
        host: args.host,
        port: args.port,
        environment: args.environment,
        cors_origins: args.cors_origins,
        static_dir: args.static_dir,
        max_upload_bytes: args.max_upload_bytes,
    };
    if config.environment.is_production() && !config.strict_cors() {
        warn!("CORS_ORIGINS not set, allowing any origin");
    }

    Ok(HttpServer::new(config, state))
}

/// Print the courses matching a lookup
pub fn query(dataset: DatasetArgs, args: QueryArgs) -> CliResult<()> {
    init_logging(LogFormat::Pretty);

    let records = FileSource::new(dataset.paths).load()?;
    let query = CourseQuery::from(args);
    let results = find_courses(&records, &query);

    info!(matched = results.len(), total = records.len(), "query complete");
    write_json(&results)
}

/// Print the filter option lists
pub fn filters(dataset: DatasetArgs) -> CliResult<()> {
    init_logging(LogFormat::Pretty);

    let records = FileSource::new(dataset.paths).load()?;
    write_json(&FilterOptions::from_records(&records))
}
