use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to <config dir>/nclip/nclip.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the clipboard history
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Command to run once; starts the interactive session when omitted
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}
