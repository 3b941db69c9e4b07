use crate::version::long_version;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, long_version = long_version(), about = "Browse and revisit past weather lookups")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// History file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Keep history in memory only, nothing is read from or written to disk
    #[arg(long, conflicts_with = "history_file")]
    pub in_memory: bool,

    /// Write debug logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
