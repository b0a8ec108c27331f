//! member-registry
//!
//! Interactive console for registering, logging in and withdrawing members.

#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use member_registry::config::{DEFAULT_CAPACITY, DEFAULT_DATA_FILE};
use member_registry::{Config, Console, RecordStore, Session};

/// Membership registry console.
#[derive(Parser, Debug)]
#[command(name = "member-registry", version, about, long_about = None)]
struct Args {
    /// Member file path
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Number of member slots
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = Config::new(args.file, args.capacity)?;

    let mut store = RecordStore::new(config.capacity);
    store
        .load_from(&config.data_file)
        .context("failed to load member file")?;

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    Session::new(&mut store, &config.data_file, console).run()?;
    Ok(())
}
