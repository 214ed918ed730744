use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Probe a host for hidden files and directories from a word list
    Brute {
        /// Target host with scheme (e.g. https://www.example.com/). Any port or path is ignored.
        host: Option<String>,

        /// Word list file name, resolved inside --dir
        #[arg(short = 'w', long)]
        wordlist: Option<String>,

        /// Directory holding the word list
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Only use the first N entries (0 or negative: all)
        #[arg(short = 'l', long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Maximum probes in flight (default: 50)
        #[arg(short = 'c', long, conflicts_with_all = ["unbounded", "sequential"])]
        concurrency: Option<usize>,

        /// Launch every probe at once (resource heavy for large lists)
        #[arg(long, default_value_t = false, conflicts_with = "sequential")]
        unbounded: bool,

        /// One probe at a time, for comparison runs
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Per-request timeout in seconds (default: 10)
        #[arg(long)]
        timeout: Option<u64>,

        /// Append hits as JSON lines to this file while the run streams
        #[arg(short = 'o', long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON config file; flags override its values
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
