use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "saavy-ear", about = "Adaptive ear-training drills in the terminal")]
pub struct EarArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Exercise settings in query form, e.g. "exercise=single-note&range=-12%2C12"
    #[arg(short, long, value_name = "QUERY", global = true)]
    pub config: Option<String>,

    /// Directory holding practice tables and the session log
    #[arg(short, long, value_name = "DIR", default_value = ".saavy-ear", global = true)]
    pub data_dir: PathBuf,

    /// Seed for reproducible questions
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Print sequences instead of playing them
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    pub mute: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run a practice session (default)")]
    Practice,
    #[command(about = "Show past sessions and the hardest transitions")]
    History,
    #[command(about = "Print the effective configuration and its pool")]
    Config,
}
