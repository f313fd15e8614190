use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use projects_stars::{
    config::ConfigError, Config, Context, ErrorKind, OpenContextError, QueryError, Star,
    SyncError, UnstarError,
};
use thiserror::Error;
use tracing::debug;

#[derive(Parser)]
#[command(name = "ghs")]
#[command(version)]
#[command(about = "Mirror your GitHub stars into SQLite and search them offline")]
#[command(after_long_help = r#"ENVIRONMENT VARIABLES
    GITHUB_TOKEN        Personal access token (required by sync and unstar)
    GHS_DATABASE        SQLite database file (default: ghs.db)
    GHS_API_ROOT        API root (default: https://api.github.com)
    GHS_TIMEOUT_SECS    Per-request timeout in seconds
    RUST_LOG            Log filter, overrides --log-level
"#)]
struct Cli {
    /// SQLite database file, overrides GHS_DATABASE
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every starred repository and upsert it into the mirror
    Sync,
    /// List mirrored stars, newest first
    Query {
        /// Case-insensitive substring of the full name or description
        #[arg(short, long)]
        keyword: Option<String>,

        /// Primary language, case-insensitive exact match
        #[arg(short, long)]
        language: Option<String>,

        /// Print a JSON array instead of one line per star
        #[arg(long)]
        json: bool,
    },
    /// Remove a repository from the mirror and unstar it on GitHub
    Unstar {
        /// Repository id as shown by `query`
        repo_id: i64,
    },
}

#[derive(Debug, Error)]
enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[from]
        source: utils_trace::TracingInitError,
    },

    #[error("Config: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("OpenContext: {source}")]
    OpenContext {
        #[from]
        source: OpenContextError,
    },

    #[error("Sync: {source}")]
    Sync {
        #[from]
        source: SyncError,
    },

    #[error("Query: {source}")]
    Query {
        #[from]
        source: QueryError,
    },

    #[error("Unstar: {source}")]
    Unstar {
        #[from]
        source: UnstarError,
    },

    #[error("WriteOutput: {source}")]
    WriteOutput {
        #[from]
        source: io::Error,
    },

    #[error("RenderJson: {source}")]
    RenderJson {
        #[from]
        source: serde_json::Error,
    },
}

impl MainError {
    fn kind(&self) -> ErrorKind {
        match self {
            MainError::Config { source } => source.kind(),
            MainError::OpenContext { source } => source.kind(),
            MainError::Sync { source } => source.kind(),
            MainError::Query { source } => source.kind(),
            MainError::Unstar { source } => source.kind(),
            MainError::TracingInit { .. }
            | MainError::WriteOutput { .. }
            | MainError::RenderJson { .. } => ErrorKind::Internal,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err.kind();
            eprintln!("code:{kind}, msg:{err}");
            ExitCode::from(kind.code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), MainError> {
    utils_trace::init(&cli.log_level)?;

    let mut config = Config::from_env()?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    debug!(database = %config.database, "using mirror");

    match cli.command {
        Command::Sync => {
            let mut ctx = Context::from_config(&config, config.require_token()?)?;
            let report = ctx.sync().await?;

            println!(
                "synced {} stars over {} pages ({} rows skipped)",
                report.stars_received,
                report.pages,
                report.skipped_rows()
            );
        }
        Command::Query {
            keyword,
            language,
            json,
        } => {
            // reading the mirror never touches the network
            let token = config.token.clone().unwrap_or_default();
            let mut ctx = Context::from_config(&config, &token)?;
            let stars = ctx.query(keyword.as_deref(), language.as_deref())?;

            let mut out = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &stars)?;
                writeln!(out)?;
            } else {
                for star in &stars {
                    writeln!(out, "{}", render_line(star))?;
                }
            }
        }
        Command::Unstar { repo_id } => {
            let mut ctx = Context::from_config(&config, config.require_token()?)?;
            let unstarred = ctx.unstar(repo_id).await?;

            println!("unstarred {} ({})", unstarred.full_name, unstarred.repo_id);
        }
    }

    Ok(())
}

fn render_line(star: &Star) -> String {
    let repo = &star.repo;
    format!(
        "{}  {:>10}  {}  [{}]  stars:{}  {}",
        star.starred_at.format("%Y-%m-%d %H:%M:%S"),
        repo.id,
        repo.full_name,
        repo.lang.as_deref().unwrap_or("-"),
        repo.stargazers_count,
        repo.description.as_deref().unwrap_or(""),
    )
}
