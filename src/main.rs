//! docsearch — query a documentation search index from the command line.
//!
//! Reads a generated `search_index.js` (or a plain JSON array of entries)
//! from `--index`, `$DOCSEARCH_INDEX`, or stdin:
//!
//! - `docsearch --index build/search_index.js search test_rrule`
//! - `docsearch list -c macro < search_index.js`
//! - `docsearch export --pretty > index.json`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsearch::render::{self, RenderOptions};
use docsearch::{loader, Category, DocIndex, SearchOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docsearch",
    about = "Search a generated documentation search index"
)]
struct Cli {
    /// Index file (search_index.js or JSON). If omitted, reads from stdin.
    #[arg(short = 'i', long, env = "DOCSEARCH_INDEX", global = true)]
    index: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search titles and text, best matches first
    Search {
        /// Query words (joined with spaces)
        #[arg(required = true)]
        query: Vec<String>,

        /// Output format: text (default), markdown, json
        #[arg(short = 'f', long, default_value = "text")]
        format: String,

        /// Only show these categories. Can be specified multiple times.
        #[arg(short = 'c', long = "category")]
        categories: Vec<Category>,

        /// Only show entries of this page
        #[arg(long)]
        page: Option<String>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Base URL prepended to entry locations
        #[arg(long, default_value = "", env = "DOCSEARCH_BASE_URL")]
        base_url: String,

        /// Snippet width in characters (0 disables snippets)
        #[arg(short = 'w', long, default_value_t = 80)]
        width: usize,
    },

    /// List entries as category<TAB>location<TAB>title
    List {
        /// Only list these categories. Can be specified multiple times.
        #[arg(short = 'c', long = "category")]
        categories: Vec<Category>,
    },

    /// List pages with their entry counts
    Pages,

    /// Re-serialize the loaded index
    Export {
        /// Write the search_index.js script form instead of a JSON array
        #[arg(long, conflicts_with = "pretty")]
        js: bool,

        /// Pretty-print the JSON array
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let index = read_index(&cli)?;
    print!("{}", run(&cli.command, &index)?);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "docsearch=debug",
        _ => "docsearch=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("warning: tracing subscriber already initialized");
    }
}

fn read_index(cli: &Cli) -> Result<DocIndex> {
    match cli.index {
        Some(ref path) => loader::load_file(path)
            .with_context(|| format!("failed to load index {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            loader::parse_str(&input).context("failed to load index from stdin")
        }
    }
}

/// Execute a subcommand against a loaded index, returning what to print.
fn run(command: &Command, index: &DocIndex) -> Result<String> {
    match command {
        Command::Search {
            query,
            format,
            categories,
            page,
            limit,
            base_url,
            width,
        } => {
            let renderer = render::create_renderer(
                format,
                RenderOptions {
                    base_url: base_url.clone(),
                    width: *width,
                },
            )?;
            let query = query.join(" ");
            let opts = SearchOptions {
                categories: categories.clone(),
                page: page.clone(),
                limit: *limit,
            };
            let hits = index.search_with(&query, &opts);
            Ok(renderer.render(&hits, &query))
        }
        Command::List { categories } => {
            let mut out = String::new();
            for entry in index
                .iter()
                .filter(|e| categories.is_empty() || categories.contains(&e.category))
            {
                out.push_str(&format!(
                    "{}\t{}\t{}\n",
                    entry.category, entry.location, entry.title
                ));
            }
            Ok(out)
        }
        Command::Pages => {
            let mut out = String::new();
            for group in index.pages() {
                out.push_str(&format!("{}\t{}\n", group.page, group.entries.len()));
            }
            Ok(out)
        }
        Command::Export { js, pretty } => {
            let mut out = if *js {
                index.to_documenter_js()?
            } else {
                index.to_json_string(*pretty)?
            };
            if !out.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
    }
}
