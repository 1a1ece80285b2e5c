use std::path::PathBuf;

use clap::Parser;
use fam_core::domain::{
    common::{FamConfig, SeedConfig},
    query::value_objects::QueryLimits,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "fam-api", version, about = "FAM query API")]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub seed: SeedArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Directive string for the tracing `EnvFilter`, e.g. `info,fam_core=debug`.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct QueryArgs {
    #[arg(long = "query-default-page-size", env = "QUERY_DEFAULT_PAGE_SIZE", default_value_t = 20)]
    pub default_page_size: u32,

    #[arg(long = "query-max-page-size", env = "QUERY_MAX_PAGE_SIZE", default_value_t = 100)]
    pub max_page_size: u32,

    #[arg(long = "query-max-filter-depth", env = "QUERY_MAX_FILTER_DEPTH", default_value_t = 32)]
    pub max_filter_depth: usize,

    #[arg(
        long = "query-max-filter-length",
        env = "QUERY_MAX_FILTER_LENGTH",
        default_value_t = 2048
    )]
    pub max_filter_length: usize,

    /// Reject unknown sort fields instead of ignoring them.
    #[arg(long = "query-strict-sort", env = "QUERY_STRICT_SORT", default_value_t = false)]
    pub strict_sort: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SeedArgs {
    #[arg(long = "seed-file", env = "SEED_FILE")]
    pub file: Option<PathBuf>,
}

impl From<QueryArgs> for QueryLimits {
    fn from(args: QueryArgs) -> Self {
        Self {
            default_page_size: args.default_page_size,
            max_page_size: args.max_page_size,
            max_filter_depth: args.max_filter_depth,
            max_filter_length: args.max_filter_length,
            strict_sort: args.strict_sort,
        }
    }
}

impl From<Args> for FamConfig {
    fn from(args: Args) -> Self {
        Self {
            query: QueryLimits::from(args.query),
            seed: SeedConfig {
                file: args.seed.file,
            },
        }
    }
}
