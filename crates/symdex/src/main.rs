//! Command-line front end for symdex.

use std::{
    env,
    error::Error,
    io::{self, stderr},
    path::PathBuf,
    process::exit,
    sync::Arc,
};

use clap::Parser;
use libsymdex::{
    CompletedQuery, DEFAULT_MAX_RESULTS, GroupBy, QuerySession, SearchOptions, SearchResponse,
    SymbolCategory, SymbolIndex, init_global, load_path, render_report,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, stdin, stdout},
    runtime::Runtime,
    sync::mpsc,
    task::JoinSet,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Index to load - a JSON payload, a Doxygen table script, or a Doxygen search/ directory
    index: PathBuf,

    /// Query to run; omit with --serve
    query: Option<String>,

    /// Maximum number of results
    #[arg(long, env = "SYMDEX_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// How to cluster results
    #[arg(long, default_value = "scope", value_parser = ["scope", "category", "none"])]
    group_by: String,

    /// Comma-separated categories to search, e.g. "functions,classes"
    #[arg(long)]
    category: Option<String>,

    /// Output the response as JSON instead of a text report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Answer one query per stdin line, writing one JSON line per current result
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Cli {
    /// Search options from the command line.
    fn options(&self) -> Result<SearchOptions, Box<dyn Error>> {
        let group_by = GroupBy::parse(&self.group_by)
            .ok_or_else(|| format!("unknown grouping: {}", self.group_by))?;
        let categories = match &self.category {
            Some(list) => SymbolCategory::parse_list(list)
                .ok_or_else(|| format!("unknown category in: {list}"))?,
            None => SymbolCategory::all(),
        };
        Ok(SearchOptions::new()
            .with_max_results(self.max_results)
            .with_group_by(group_by)
            .with_categories(categories))
    }
}

/// One serve-mode request line.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    /// Echoed back on the response.
    #[serde(default)]
    id: Value,
    /// Raw query text; anything but a string is an empty query.
    #[serde(default)]
    query: Value,
    /// Per-request result cap.
    max_results: Option<usize>,
    /// Per-request scope grouping toggle.
    group_by_scope: Option<bool>,
}

impl SearchRequest {
    /// Read a request line. Lines that are not a JSON request are plain query text.
    fn parse(line: &str) -> Self {
        serde_json::from_str(line).unwrap_or_else(|_| Self {
            query: Value::String(line.to_string()),
            ..Self::default()
        })
    }

    /// The query text to issue.
    fn query_text(&self) -> &str {
        self.query.as_str().unwrap_or("")
    }

    /// Apply per-request overrides to the command-line defaults.
    fn options(&self, defaults: &SearchOptions) -> SearchOptions {
        let mut options = defaults.clone();
        if let Some(max_results) = self.max_results {
            options = options.with_max_results(max_results);
        }
        if let Some(group_by_scope) = self.group_by_scope {
            options = options.with_group_by_scope(group_by_scope);
        }
        options
    }
}

/// One serve-mode response line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServeResponse<'a> {
    /// The request's id, omitted when it had none.
    #[serde(skip_serializing_if = "Value::is_null")]
    id: Value,
    /// Generation the request was issued with.
    generation: u64,
    /// The results.
    #[serde(flatten)]
    response: &'a SearchResponse,
}

/// Install a stderr subscriber when `RUST_LOG` is set, keeping stdout for results.
fn init_tracing() {
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(stderr)
            .init();
    }
}

fn run_query(cli: &Cli, index: &SymbolIndex) -> Result<(), Box<dyn Error>> {
    let options = cli.options()?;
    let response = index.search(cli.query.as_deref().unwrap_or(""), &options);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_report(&response));
    }
    Ok(())
}

fn run_serve(cli: &Cli, index: Arc<SymbolIndex>) -> Result<(), Box<dyn Error>> {
    if cli.query.is_some() || cli.json {
        return Err("--serve reads queries from stdin and always writes JSON".into());
    }
    let defaults = cli.options()?;
    let runtime = Runtime::new()?;
    runtime.block_on(serve(QuerySession::new(index), defaults))
}

/// Answer stdin requests concurrently, writing only results that are still current.
async fn serve(session: QuerySession, defaults: SearchOptions) -> Result<(), Box<dyn Error>> {
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<(Value, CompletedQuery)>();

    let writer_session = session.clone();
    let writer = tokio::spawn(async move {
        let mut stdout = stdout();
        while let Some((id, done)) = results_rx.recv().await {
            // A newer request may have arrived while this one was queued.
            if !writer_session.is_current(done.generation) {
                debug!("Suppressing superseded result {}", done.generation);
                continue;
            }
            let line = serde_json::to_string(&ServeResponse {
                id,
                generation: done.generation,
                response: &done.response,
            })?;
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut workers = JoinSet::new();
    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let request = SearchRequest::parse(&line);
        let pending = session.issue(request.query_text(), request.options(&defaults));
        let results_tx = results_tx.clone();
        let id = request.id;
        workers.spawn_blocking(move || {
            if let Some(done) = pending.run() {
                results_tx.send((id, done)).ok();
            }
        });
    }
    drop(results_tx);

    while let Some(joined) = workers.join_next().await {
        joined?;
    }
    writer.await??;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let index = match load_path(&cli.index).and_then(init_global) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("search unavailable: {e}");
            exit(1);
        }
    };

    let result = if cli.serve {
        run_serve(&cli, index)
    } else {
        run_query(&cli, &index)
    };

    if let Err(e) = result {
        eprintln!("{e}");
        exit(1);
    }
}
