use std::time::{Duration, Instant};

use tracing::info;

/// Throttled completion reporter with an elapsed-time based ETA.
///
/// Emits on every `every`-th completion and on the final one, so large batches do not flood
/// the log. The completed count only ever grows.
#[derive(Debug)]
pub(crate) struct Progress {
    label: String,
    total: usize,
    every: usize,
    completed: usize,
    started: Instant,
}

impl Progress {
    pub(crate) fn new(label: impl Into<String>, total: usize, every: usize) -> Self {
        Self {
            label: label.into(),
            total,
            every: every.max(1),
            completed: 0,
            started: Instant::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn completed(&self) -> usize {
        self.completed
    }

    /// Count one finished task; returns the progress line when one was emitted.
    pub(crate) fn record(&mut self) -> Option<String> {
        self.completed = (self.completed + 1).min(self.total);
        if !should_report(self.completed, self.total, self.every) {
            return None;
        }
        let line = format_line(
            &self.label,
            self.completed,
            self.total,
            self.started.elapsed(),
        );
        info!(completed = self.completed, total = self.total, "{line}");
        Some(line)
    }
}

pub(crate) fn should_report(completed: usize, total: usize, every: usize) -> bool {
    completed == total || completed % every.max(1) == 0
}

/// Remaining time, extrapolated from the average time per completed task.
pub(crate) fn eta(elapsed: Duration, completed: usize, total: usize) -> Option<Duration> {
    if completed == 0 {
        return None;
    }
    let remaining = total.saturating_sub(completed) as f64;
    Some(elapsed.mul_f64(remaining / completed as f64))
}

pub(crate) fn format_line(label: &str, completed: usize, total: usize, elapsed: Duration) -> String {
    let pct = if total == 0 {
        100
    } else {
        completed * 100 / total
    };
    let eta = eta(elapsed, completed, total)
        .map(|d| format!("{:.1}s", d.as_secs_f64()))
        .unwrap_or_else(|| "?".to_owned());
    format!(
        "{label} {completed}/{total} ({pct}%) elapsed {:.1}s eta {eta}",
        elapsed.as_secs_f64()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
