//! Run command implementation.
//!
//! Executes a command once per input item, retrying failed items in rounds.

use anyhow::{Context, bail};
use clap::Args;
use colored::Colorize;
use resweep_core::batch::{
    BatchProcessor, BatchProgressTracker, RoundProgress, parse_input_file, render_progress,
    render_summary,
};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::load_config;

/// Placeholder replaced with the current item.
const ITEM_PLACEHOLDER: &str = "{}";

/// Arguments for `resweep run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input file with items (line-delimited or JSON array)
    #[arg(long)]
    pub input_file: PathBuf,

    /// Maximum number of rounds, including the first
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Print what succeeded instead of failing when rounds run out
    #[arg(long, conflicts_with = "no_ignore_error")]
    pub ignore_error: bool,

    /// Fail when rounds run out, even if config or environment says otherwise
    #[arg(long)]
    pub no_ignore_error: bool,

    /// Do not print command output, only run for side effects
    #[arg(long)]
    pub no_collect: bool,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Configuration file to load instead of the discovered ones
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render round progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Command to run for each item, given after `--`
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

/// Program and argument template for one item.
#[derive(Debug, Clone)]
struct CommandTemplate {
    program: String,
    args: Vec<String>,
    has_placeholder: bool,
}

impl CommandTemplate {
    fn new(command: &[String]) -> anyhow::Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("No command given");
        };

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            has_placeholder: args.iter().any(|arg| arg.contains(ITEM_PLACEHOLDER)),
        })
    }

    fn args_for(&self, item: &str) -> Vec<String> {
        if self.has_placeholder {
            self.args
                .iter()
                .map(|arg| arg.replace(ITEM_PLACEHOLDER, item))
                .collect()
        } else {
            let mut args = self.args.clone();
            args.push(item.to_string());
            args
        }
    }
}

/// Run the templated command for one item and return its trimmed stdout.
async fn run_item(template: &CommandTemplate, item: &str) -> anyhow::Result<String> {
    let output = Command::new(&template.program)
        .args(template.args_for(item))
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("Failed to spawn {}", template.program))?;

    if !output.status.success() {
        bail!(
            "{} exited with {}: {}",
            template.program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Execute the run command.
pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = max_rounds;
    }
    if args.ignore_error {
        config.ignore_error = true;
    }
    if args.no_ignore_error {
        config.ignore_error = false;
    }
    if args.no_collect {
        config.collect_results = false;
    }
    config.validate()?;

    let template = CommandTemplate::new(&args.command)?;
    let items = parse_input_file(&args.input_file)
        .with_context(|| format!("Failed to parse input file: {}", args.input_file.display()))?;

    info!(
        items = items.len(),
        max_rounds = config.max_rounds,
        program = %template.program,
        "Starting batch run"
    );

    let mut processor = BatchProcessor::new(config);
    let tracker = Arc::new(Mutex::new(BatchProgressTracker::new(
        items.len(),
        processor.config().max_rounds,
    )));
    if args.progress {
        let tracker = Arc::clone(&tracker);
        processor = processor.with_progress(Arc::new(move |progress: &RoundProgress| {
            if let Ok(mut tracker) = tracker.lock() {
                tracker.update(progress);
                if let Err(e) = render_progress(&mut std::io::stderr(), &tracker) {
                    debug!(error = %e, "Failed to render progress");
                }
            }
        }));
    }

    let template = &template;
    let report = processor
        .process(&items, move |item| run_item(template, item))
        .await?;

    let mut stdout = std::io::stdout().lock();
    for (index, output) in &report.successful {
        if args.json {
            let line = serde_json::json!({
                "index": index,
                "item": items[*index],
                "output": output,
            });
            writeln_stdout(&mut stdout, &line.to_string())?;
        } else {
            writeln_stdout(&mut stdout, output)?;
        }
    }

    if args.progress {
        if let Ok(tracker) = tracker.lock() {
            render_summary(&mut std::io::stderr(), &tracker, &report.failed)?;
        }
    }

    if !report.failed.is_empty() {
        let indices: Vec<String> = report.failed.iter().map(ToString::to_string).collect();
        eprintln!(
            "{} {} item(s) failed after {} round(s): {}",
            "⚠".yellow(),
            report.failed.len(),
            report.rounds,
            indices.join(", ")
        );
    }

    Ok(())
}

fn writeln_stdout(out: &mut impl std::io::Write, line: &str) -> anyhow::Result<()> {
    writeln!(out, "{}", line).context("Failed to write output")
}
