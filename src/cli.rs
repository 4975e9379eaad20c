//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Recommend academic journals for a research field and keywords.
///
/// Ranks national journals from a curated directory and international
/// journals from the Scopus catalog, printing the JSON response to stdout.
/// The request comes from `--field`/`--keyword`, from `--request`, or as
/// JSON piped on stdin.
#[derive(Parser, Debug)]
#[command(name = "journal-ranker")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/journal-ranker/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Curated directory JSON file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Research field of the paper
    #[arg(short, long, conflicts_with = "request")]
    pub field: Option<String>,

    /// Keyword extracted from the paper (repeatable, earlier ones weigh more in search)
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD", conflicts_with = "request")]
    pub keywords: Vec<String>,

    /// JSON request file, or `-` for stdin
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Returns true when the request is given through `--field`/`--keyword`.
    #[must_use]
    pub fn has_inline_query(&self) -> bool {
        self.field.is_some() || !self.keywords.is_empty()
    }
}
