use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quietfeed",
    bin_name = "quietfeed",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Toggle the quietfeed post filter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory holding settings.json and quietfeed.toml
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show whether posts are being hidden (default)
    Status,

    /// Start hiding matching posts
    Enable,

    /// Stop hiding and reveal everything
    Disable,

    /// Flip the current state
    Toggle,

    /// Check whether a text would be hidden
    Check {
        /// Text to classify; multiple arguments are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}
