//! # quietfeed
//!
//! Terminal counterpart of the feed filter's toggle. It reads and writes the
//! shared `enabled` flag in the quietfeed data directory; a running filter
//! picks the change up through its flag store. It can also classify a piece of
//! text against the configured topics, which is handy when tuning
//! `extra_patterns`.
//!
//! ## Layering
//!
//! - **Library (`quietfeedapp`)**: flag store, configuration and matcher. No
//!   terminal I/O.
//! - **CLI (`src/cli/`)**: argument parsing, styling and exit codes. The only
//!   place that knows about stdout, stderr or `RUST_LOG`.
//!
//! Logging is off unless `RUST_LOG` asks for it, e.g.
//! `RUST_LOG=quietfeedapp=debug quietfeed check "..."`.

mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
