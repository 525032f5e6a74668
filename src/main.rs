//! CLI entry point for the grade_lens dashboard tool.
//!
//! Provides subcommands for querying a course's historical grade
//! distributions, running the browser-facing proxy, and managing
//! bookmarked classes.

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use grade_lens::analyzers::filter::TimeRange;
use grade_lens::bookmarks::{Bookmarks, JsonFileStore};
use grade_lens::fetch::{self, AnexClient, FetchError};
use grade_lens::output;
use grade_lens::proxy;
use grade_lens::session::Session;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_lens")]
#[command(about = "Query and aggregate historical grade distributions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a course's grade history and print the aggregated dashboard data
    Query {
        /// Department code (e.g. CSCE)
        department: String,

        /// Course number (e.g. 121)
        course: String,

        /// Time window in years: all, 2, 3 or 5
        #[arg(short, long, default_value = "all")]
        range: TimeRange,

        /// Comma-separated professor names to restrict the selection to
        #[arg(short, long)]
        professors: Option<String>,

        /// Render the grouped table as text instead of JSON
        #[arg(short, long, default_value_t = false)]
        table: bool,

        /// CSV file to append professor rankings to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run the proxy that forwards dashboard queries to the upstream service
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: String,

        /// Upstream origin to forward queries to (defaults to ANEX_BASE_URL)
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Manage bookmarked classes
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Bookmark a class
    Add { department: String, course: String },
    /// Remove a bookmarked class
    Remove { department: String, course: String },
    /// List bookmarked classes
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_lens.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_lens.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            department,
            course,
            range,
            professors,
            table,
            output,
        } => {
            query(department, course, range, professors, table, output).await?;
        }
        Commands::Serve { bind, upstream } => {
            let upstream = upstream.unwrap_or_else(base_url);
            proxy::serve(&bind, upstream).await?;
        }
        Commands::Bookmark { action } => {
            let path = std::env::var("BOOKMARKS_PATH")
                .unwrap_or_else(|_| "bookmarks.json".to_string());
            let mut bookmarks = Bookmarks::open(JsonFileStore::new(path))?;

            match action {
                BookmarkAction::Add { department, course } => {
                    let department = department.to_uppercase();
                    if bookmarks.add(&department, &course)? {
                        println!("Bookmarked {department} {course}.");
                    } else {
                        println!("{department} {course} is already bookmarked.");
                    }
                }
                BookmarkAction::Remove { department, course } => {
                    let department = department.to_uppercase();
                    if bookmarks.remove(&department, &course)? {
                        println!("Removed {department} {course}.");
                    } else {
                        println!("{department} {course} was not bookmarked.");
                    }
                }
                BookmarkAction::List => {
                    if bookmarks.entries().is_empty() {
                        println!("No bookmarks yet.");
                    }
                    for bm in bookmarks.entries() {
                        println!("{} {}", bm.department, bm.course);
                    }
                }
            }
        }
    }

    Ok(())
}

fn base_url() -> String {
    std::env::var("ANEX_BASE_URL").unwrap_or_else(|_| fetch::DEFAULT_BASE_URL.to_string())
}

async fn query(
    department: String,
    course: String,
    range: TimeRange,
    professors: Option<String>,
    table: bool,
    output: Option<String>,
) -> Result<()> {
    let department = department.to_uppercase();
    let client = AnexClient::new(base_url())?;

    let mut session = Session::new(Utc::now().year());
    let generation = session.begin_query();

    match fetch::fetch_records(&client, &department, &course).await {
        Ok(records) => {
            info!(
                department = %department,
                course = %course,
                records = records.len(),
                "fetched grade records"
            );
            session.apply_response(generation, records);
        }
        Err(FetchError::UpstreamEmpty) => {
            warn!(department = %department, course = %course, "no data found");
            println!("No data found for {department} {course}.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    session.set_range(range);

    if let Some(list) = professors {
        let subset: Vec<String> = list
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        session.set_selection(subset);
    }

    if let Some(best) = &session.derived().best_professor {
        info!(
            professor = %best.professor,
            avg_gpa = best.avg_gpa,
            range = %session.range(),
            "best professor"
        );
    }

    if table {
        print!("{}", output::render_table(&session.derived().table));
    } else {
        output::print_json(session.derived())?;
    }

    if let Some(path) = output {
        output::append_rankings(&path, &department, &course, &session.derived().professors)?;
    }

    Ok(())
}
