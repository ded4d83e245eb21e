//! papersearch: search a remote paper corpus from the terminal
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use papersearch::{
    config::{self, Settings},
    results::SortMode,
    search::{IndexingField, SearchController},
    view::{
        render_header, render_options, render_page, render_stats, Command, Feature,
        RenderOptions, HELP,
    },
};
use std::cell::Cell;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

#[derive(Debug, Parser)]
#[command(name = "papersearch", version, about = "Search a remote paper corpus")]
struct Cli {
    /// Query to run. Starts an interactive session when omitted
    query: Vec<String>,

    /// Path to settings.yml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the search API
    #[arg(long)]
    api_url: Option<String>,

    /// Use the plain search endpoint instead of deep search
    #[arg(long)]
    simple: bool,

    /// Result order: relevance or social_impact
    #[arg(long)]
    sort: Option<SortMode>,

    /// Indexing field to search (repeatable; replaces the configured set)
    #[arg(long = "field")]
    fields: Vec<String>,

    /// Page to print for a one-shot query
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Command line flags win over settings file and environment
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.api_url {
            settings.api.base_url = url.clone();
        }
        if self.simple {
            settings.search.deep = false;
        }
        if let Some(sort) = self.sort {
            settings.search.sort = sort;
        }
        if !self.fields.is_empty() {
            settings.search.indexing_fields = self.fields.clone();
        }
        if self.debug {
            settings.general.debug = true;
        }
    }
}

type LogHandle = reload::Handle<EnvFilter, Registry>;

fn log_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }))
}

/// Logs go to stderr so stdout only carries rendered results
fn init_logging(debug: bool) -> LogHandle {
    let (filter, handle) = reload::Layer::new(log_filter(debug));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
    handle
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = init_logging(cli.debug);

    let mut settings = config::load(cli.config.clone())?;
    cli.apply(&mut settings);
    if settings.general.debug && !cli.debug {
        log.modify(|filter| *filter = log_filter(true))?;
    }

    info!(
        "Starting papersearch v{} against {}",
        papersearch::VERSION,
        settings.api.base_url
    );

    let mut ctl = SearchController::from_settings(&settings)?;
    ctl.initialize().await;

    if cli.no_color {
        colored::control::set_override(false);
    }
    let opts = RenderOptions {
        color: !cli.no_color,
    };

    let query = cli.query.join(" ");
    if !query.trim().is_empty() {
        run_search(&mut ctl, &query).await;
        if cli.page > 1 && !ctl.set_page(cli.page) {
            eprintln!("No page {}", cli.page);
        }
        print!("{}", render_page(&ctl, opts));
        return Ok(());
    }

    interactive(&mut ctl, opts).await?;
    ctl.shutdown();
    Ok(())
}

/// Live elapsed-time counter on stderr, erased when dropped
struct Progress {
    live: bool,
    width: Cell<usize>,
}

impl Progress {
    fn new() -> Self {
        Self {
            live: std::io::stderr().is_terminal(),
            width: Cell::new(0),
        }
    }

    fn tick(&self, elapsed: &str) {
        if self.live {
            let line = format!("Searching... {}s", elapsed);
            self.width.set(line.chars().count());
            eprint!("\r{}", line);
            let _ = std::io::stderr().flush();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if self.width.get() > 0 {
            eprint!("\r{:width$}\r", "", width = self.width.get());
        }
    }
}

async fn run_search(ctl: &mut SearchController, query: &str) {
    let progress = Progress::new();
    ctl.submit_search_with_progress(query, |elapsed| progress.tick(elapsed))
        .await;
}

async fn interactive(ctl: &mut SearchController, opts: RenderOptions) -> Result<()> {
    print!("{}", render_header(ctl));
    println!("Type :help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Search(query) => {
                run_search(ctl, &query).await;
                print!("{}", render_page(ctl, opts));
            }
            Command::Next => {
                if ctl.next_page() {
                    print!("{}", render_page(ctl, opts));
                } else {
                    println!("Already on the last page");
                }
            }
            Command::Prev => {
                if ctl.prev_page() {
                    print!("{}", render_page(ctl, opts));
                } else {
                    println!("Already on the first page");
                }
            }
            Command::Page(page) => {
                if ctl.set_page(page) {
                    print!("{}", render_page(ctl, opts));
                } else {
                    println!("No page {}", page);
                }
            }
            Command::Sort(mode) => {
                ctl.set_sort_mode(mode);
                print!("{}", render_page(ctl, opts));
            }
            Command::Field(field) => {
                let selected = ctl.toggle_indexing_field(&field);
                let known = IndexingField::from_name(&field).is_some();
                println!(
                    "{} {}{}",
                    field,
                    if selected { "selected" } else { "deselected" },
                    if known { "" } else { " (not a known field)" }
                );
            }
            Command::Toggle(feature) => {
                let toggles = ctl.toggles_mut();
                let flag = match feature {
                    Feature::Deep => &mut toggles.deep,
                    Feature::QueryUnderstanding => &mut toggles.query_understanding,
                    Feature::SmartRerank => &mut toggles.smart_rerank,
                    Feature::Cache => &mut toggles.use_cache,
                    Feature::SocialImpact => &mut toggles.social_impact,
                };
                *flag = !*flag;
                print!("{}", render_options(ctl));
            }
            Command::Suggest(n) => {
                let suggestion = n
                    .checked_sub(1)
                    .and_then(|i| ctl.recommended_queries().get(i))
                    .cloned();
                match suggestion {
                    Some(query) => {
                        let progress = Progress::new();
                        ctl.search_with_suggestion_with_progress(&query, |elapsed| {
                            progress.tick(elapsed)
                        })
                        .await;
                        drop(progress);
                        print!("{}", render_page(ctl, opts));
                    }
                    None => println!("No suggestion {}", n),
                }
            }
            Command::Clear => {
                ctl.clear_search();
                print!("{}", render_header(ctl));
            }
            Command::Stats => print!("{}", render_stats(ctl)),
            Command::Options => print!("{}", render_options(ctl)),
            Command::Help => print!("{}", HELP),
            Command::Quit => break,
            Command::Empty => {}
        }
    }

    Ok(())
}
