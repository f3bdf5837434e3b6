//! Terminal rendering for batch progress.

use crate::batch::progress::{BatchProgressTracker, format_duration};
use std::io::{self, Write};

/// Render a progress bar and round metrics.
pub fn render_progress<W: Write>(out: &mut W, tracker: &BatchProgressTracker) -> io::Result<()> {
    let percentage = tracker.percentage();
    let bar_width = 40;
    let filled = ((bar_width as f64 * percentage / 100.0) as usize).min(bar_width);
    let empty = bar_width - filled;

    writeln!(
        out,
        "Round {}/{}: {}{} {}/{} ({:.1}%) | Pending: {} | Avg: {}/round",
        tracker.rounds,
        tracker.max_rounds,
        "━".repeat(filled),
        "─".repeat(empty),
        tracker.succeeded,
        tracker.total,
        percentage,
        tracker.pending,
        tracker.average_round()
    )?;

    out.flush()
}

/// Render summary report after batch completion.
pub fn render_summary<W: Write>(
    out: &mut W,
    tracker: &BatchProgressTracker,
    failed_indices: &[usize],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Batch Execution Complete")?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;

    writeln!(out, "Total Items: {}", tracker.total)?;
    writeln!(
        out,
        "Successful: {} ({:.1}%)",
        tracker.succeeded,
        tracker.percentage()
    )?;
    writeln!(out, "Failed: {}", failed_indices.len())?;
    writeln!(out, "Rounds: {}/{}", tracker.rounds, tracker.max_rounds)?;
    writeln!(
        out,
        "Total Duration: {}",
        format_duration(tracker.start_time.elapsed())
    )?;

    if !failed_indices.is_empty() {
        writeln!(out, "\nFailed Items:")?;
        for index in failed_indices {
            writeln!(out, "  #{}", index)?;
        }
    }

    out.flush()
}
