//! CLI entry point for the journal ranker.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use journal_ranker::{ApiResponse, EngineConfig, RankingEngine, handle_request};
use serde_json::json;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries the JSON response; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let Some(body) = read_request_body(&args)? else {
        info!("No input provided. Pass --field/--keyword, --request FILE, or pipe JSON via stdin.");
        info!(r#"Example: echo '{{"field":"Law","keywords":["privacy"]}}' | journal-ranker"#);
        return Ok(ExitCode::SUCCESS);
    };

    let mut config = EngineConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(directory) = &args.directory {
        config.directory = Some(directory.clone());
    }
    debug!(?config, "Configuration resolved");

    let engine = RankingEngine::from_config(&config).context("Failed to initialize ranking engine")?;
    let response = handle_request(&engine, &body).await;

    print_response(&response, args.pretty)?;
    Ok(exit_code_for(&response))
}

/// Reads the request body from the inline query, a file, or stdin.
fn read_request_body(args: &Args) -> Result<Option<String>> {
    if args.has_inline_query() {
        let body = json!({
            "field": args.field.clone().unwrap_or_default(),
            "keywords": args.keywords,
        });
        return Ok(Some(body.to_string()));
    }

    match args.request.as_deref() {
        Some(path) if path == Path::new("-") => read_stdin().map(Some),
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file '{}'", path.display()))
            .map(Some),
        None if !io::stdin().is_terminal() => read_stdin().map(Some),
        None => Ok(None),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read request from stdin")?;
    Ok(buffer)
}

fn print_response(response: &ApiResponse, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(&response.body)?
    } else {
        serde_json::to_string(&response.body)?
    };
    println!("{rendered}");
    Ok(())
}

fn exit_code_for(response: &ApiResponse) -> ExitCode {
    if response.status.is_success() {
        ExitCode::SUCCESS
    } else if response.status.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
