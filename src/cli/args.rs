//! CLI argument definitions using clap
//!
//! Commands:
//! - course-equivalency serve
//! - course-equivalency query [--search ..] [--program ..] ...
//! - course-equivalency filters
//!
//! Every server option can also come from the environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::http_server::Environment;
use crate::observability::LogFormat;
use crate::query::CourseQuery;

/// Foreign course equivalency lookup service
#[derive(Parser, Debug)]
#[command(name = "course-equivalency")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve(ServeArgs),

    /// Run one course lookup and print the matches as JSON
    Query {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the filter option lists as JSON
    Filters {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
}

/// Where to read the course dataset from
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Dataset files (JSON or workbook), tried in order
    #[arg(
        long = "dataset",
        env = "DATASET_PATH",
        value_delimiter = ',',
        default_values = ["data/courses.json", "data/courses.xlsx"]
    )]
    pub paths: Vec<PathBuf>,
}

/// HTTP server options
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// development or production
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub environment: Environment,

    /// pretty or json; defaults to json in production
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Static admin token; a random one is generated when unset
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Admin login name
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Admin password; login is disabled when unset
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Allowed origins in production (comma separated)
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Built browser app to serve in production
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Upload body limit in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 20 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Write uploaded datasets back to the first dataset path
    #[arg(long, env = "PERSIST_UPLOADS")]
    pub persist_uploads: bool,
}

/// Lookup parameters, same names as the HTTP query string
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub program: Option<String>,
    #[arg(long)]
    pub credits: Option<String>,
    #[arg(long)]
    pub aok: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

impl From<QueryArgs> for CourseQuery {
    fn from(args: QueryArgs) -> Self {
        CourseQuery {
            search: args.search,
            program: args.program,
            credits: args.credits,
            aok: args.aok,
            school: args.school,
            department: args.department,
            sort: args.sort,
            order: args.order,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
