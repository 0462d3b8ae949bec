use anyhow::Result;
use clap::{Parser, Subcommand};
use docscope::{config::Config, fetcher::HttpPageSource, providers::LogscaleProvider};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Search and read LogScale query language documentation from the terminal.
///
/// Results are printed as pretty JSON. Configuration comes from the
/// environment: RTFD_FETCH, LOGSCALE_BASE_URL, RTFD_MAX_BYTES and
/// RTFD_SEARCH_LIMIT.
#[derive(Parser)]
#[command(name = "docscope", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank syntax topics, function categories and functions for a query.
    Search {
        /// Free-text query; words are matched independently.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results (defaults to RTFD_SEARCH_LIMIT).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List function categories, or the functions in one category.
    Functions { category: Option<String> },

    /// Fetch the documentation page for a syntax topic.
    Syntax {
        topic: String,

        /// Byte budget for the extracted content (defaults to RTFD_MAX_BYTES).
        #[arg(long)]
        max_bytes: Option<usize>,
    },

    /// Fetch the reference page for a function, e.g. `regex` or `array:append`.
    Function {
        name: String,

        /// Byte budget for the extracted content (defaults to RTFD_MAX_BYTES).
        #[arg(long)]
        max_bytes: Option<usize>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env();
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // stdout carries the JSON result, logs go to stderr
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let provider = LogscaleProvider::new(Config::from_env()?, HttpPageSource);
    let max_bytes_default = provider.config().max_bytes();

    match cli.command {
        Command::Search { query, limit } => {
            let query = query.join(" ");
            let response = provider
                .search_docs(&query, limit.unwrap_or(provider.config().search_limit()))
                .await;
            print_json(&response)
        }
        Command::Functions { category } => {
            print_json(&provider.list_functions(category.as_deref()).await)
        }
        Command::Syntax { topic, max_bytes } => {
            let lookup = provider
                .fetch_syntax_docs(&topic, max_bytes.unwrap_or(max_bytes_default))
                .await;
            print_json(&lookup)
        }
        Command::Function { name, max_bytes } => {
            let lookup = provider
                .fetch_function_docs(&name, max_bytes.unwrap_or(max_bytes_default))
                .await;
            print_json(&lookup)
        }
    }
}
