use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use picky_lib::{extract_pages, Parser};

/// Extract elements from HTML pages with a picky rule file.
#[derive(ClapParser, Debug)]
#[command(name = "picky", version)]
struct Args {
    /// Rule file (`.yml`, `.yaml` or `.json`).
    rules: PathBuf,

    /// HTML pages to extract from.
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let instruction = Parser::for_file(&args.rules)
        .parse()
        .with_context(|| format!("loading rules from {}", args.rules.display()))?;

    let pages = args
        .pages
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("reading page {}", path.display()))
        })
        .collect::<Result<Vec<String>>>()?;

    let snapshots = extract_pages(&instruction, &pages);
    let output = if args.pretty {
        serde_json::to_string_pretty(&snapshots)?
    } else {
        serde_json::to_string(&snapshots)?
    };
    println!("{}", output);
    Ok(())
}
