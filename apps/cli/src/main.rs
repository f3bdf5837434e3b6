//! resweep CLI - run a command once per input item, retrying failed items.
//!
//! Each item gets its own process. All items of a round run concurrently,
//! and only the items whose process failed are run again in the next round.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::run::RunArgs;

/// resweep - concurrent batch runner with retry rounds
#[derive(Parser, Debug)]
#[command(
    name = "resweep",
    author,
    version,
    about = "Run a command for every input item, retrying only the failures"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a command for every item of an input file
    ///
    /// Occurrences of `{}` in the command are replaced with the item. If no
    /// argument contains `{}`, the item is appended as the last argument.
    Run(RunArgs),

    /// Print the effective configuration
    Config {
        /// Configuration file to load instead of the discovered ones
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Run(run_args) => commands::run::execute(run_args).await,
        Command::Config { config } => commands::show_config::execute(config.as_deref()),
    }
}
