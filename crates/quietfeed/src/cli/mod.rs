//! # CLI Behavior
//!
//! The toggle never talks to a running filter. Every command opens the flag
//! store in the data directory, does one read or write, prints and exits.
//!
//! - `quietfeed` with no command behaves like `quietfeed status`.
//! - `enable`, `disable` and `toggle` print the state they wrote.
//! - `check` exits 0 when the text matches a topic and 1 when it doesn't, so
//!   it can be used in shell conditionals.
//!
//! The data directory is `--data-dir` when given, otherwise the platform data
//! directory for quietfeed.

mod render;
pub mod setup;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::debug;
use quietfeedapp::api::QuietfeedApi;
use quietfeedapp::config::QuietfeedConfig;
use quietfeedapp::store::fs::{default_data_dir, FsFlagStore};
use setup::{Cli, Commands};
use std::path::PathBuf;

/// Runs the CLI and returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!("data dir: {}", data_dir.display());
    let config = QuietfeedConfig::load_from_dir(&data_dir)?;
    let api = QuietfeedApi::new(FsFlagStore::new(data_dir), config);

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => println!("{}", render::status_line(api.status()?)),
        Commands::Enable => println!("{}", render::status_line(api.enable()?)),
        Commands::Disable => println!("{}", render::status_line(api.disable()?)),
        Commands::Toggle => println!("{}", render::status_line(api.toggle()?)),
        Commands::Check { text } => {
            let result = api.check(&text.join(" "))?;
            if let Some(pattern) = &result.pattern {
                debug!("matched {}", pattern);
            }
            println!("{}", render::check_line(&result));
            return Ok(if result.matched { 0 } else { 1 });
        }
    }
    Ok(0)
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(default_data_dir)
        .ok_or_else(|| anyhow!("could not determine a data directory, pass --data-dir"))
}
