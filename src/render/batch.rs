//! Parallel fan-out with per-task failure isolation.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::mpsc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::assets::processor::AssetProcessor;
use crate::config::GeneratorOpts;
use crate::foundation::core::Song;
use crate::foundation::error::{HitsterError, HitsterResult};
use crate::foundation::io::ensure_dir;
use crate::render::progress::Progress;
use crate::render::qr::{CodeStyle, generate_one};
use crate::theme::assign::{Assignment, CyclicAssigner};
use crate::theme::registry::{ArtworkPurpose, ThemeRegistry};

/// One failed task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    /// What failed, e.g. `song 4uLU6h`.
    pub key: String,
    /// Underlying cause.
    pub cause: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.cause)
    }
}

/// Aggregate outcome of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    /// Noun for the produced items, e.g. `QR codes`.
    pub what: String,
    /// Tasks dispatched.
    pub total: usize,
    /// Failed tasks, in completion order.
    pub failures: Vec<TaskFailure>,
}

impl BatchReport {
    fn empty(what: &str) -> Self {
        Self {
            what: what.to_owned(),
            total: 0,
            failures: Vec::new(),
        }
    }

    /// Tasks that produced their output.
    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    /// `true` when no task failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line end-of-run summary naming every failure.
    pub fn summary(&self) -> String {
        if self.is_success() {
            return format!("Successfully generated all {} {}", self.total, self.what);
        }
        let details = self
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "Completed with {} errors out of {} {}: {details}",
            self.failures.len(),
            self.total,
            self.what
        )
    }
}

struct Completion {
    key: String,
    outcome: Result<(), String>,
}

/// Run `task` over `jobs` on `workers` threads and collect the outcome.
///
/// Tasks complete in any order. An error or panic in one task is recorded against its key and
/// never affects the others. Only thread-pool construction can fail the whole batch.
pub(crate) fn run_tasks<J, K, F>(
    what: &str,
    jobs: &[J],
    workers: usize,
    progress_every: usize,
    key: K,
    task: F,
) -> HitsterResult<BatchReport>
where
    J: Sync,
    K: Fn(&J) -> String + Sync,
    F: Fn(&J) -> HitsterResult<()> + Sync,
{
    let mut report = BatchReport::empty(what);
    report.total = jobs.len();
    if jobs.is_empty() {
        return Ok(report);
    }

    let pool = build_thread_pool(workers)?;
    let mut progress = Progress::new(what, jobs.len(), progress_every);

    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<Completion>();
        let key = &key;
        let task = &task;
        let pool = &pool;

        scope.spawn(move || {
            pool.install(|| {
                jobs.par_iter().for_each_with(tx, |tx, job| {
                    let outcome = match catch_unwind(AssertUnwindSafe(|| task(job))) {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(panic) => Err(format!("panicked: {}", panic_message(&*panic))),
                    };
                    // The receiver outlives every sender.
                    let _ = tx.send(Completion {
                        key: key(job),
                        outcome,
                    });
                });
            });
        });

        for done in rx {
            if let Err(cause) = done.outcome {
                warn!(key = %done.key, %cause, "task failed");
                report.failures.push(TaskFailure {
                    key: done.key,
                    cause,
                });
            }
            progress.record();
        }
    });

    Ok(report)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

fn build_thread_pool(threads: usize) -> HitsterResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("hitster-worker-{i}"))
        .build()
        .map_err(|e| HitsterError::setup(format!("failed to build rayon thread pool: {e}")))
}

struct CodeJob<'a> {
    song: &'a Song,
    assignment: Assignment<'a>,
}

/// Generate one code image per song into `opts.output_dir`.
///
/// Assignments are resolved up front, then every song is rendered independently on a bounded
/// pool. The output directory is created if needed but never cleared. Per-song failures are
/// collected into the report; only configuration and setup problems return `Err`.
pub fn generate_qr_codes(
    registry: &ThemeRegistry,
    processor: &AssetProcessor,
    opts: &GeneratorOpts,
    songs: &[Song],
) -> HitsterResult<BatchReport> {
    const WHAT: &str = "QR codes";

    opts.validate()?;
    if songs.is_empty() {
        info!("No songs to process");
        return Ok(BatchReport::empty(WHAT));
    }

    let assigner = CyclicAssigner::for_theme(registry, opts.theme, ArtworkPurpose::QrOverlay)?;
    ensure_dir(&opts.output_dir)?;

    let jobs: Vec<CodeJob<'_>> = songs
        .iter()
        .enumerate()
        .map(|(i, song)| CodeJob {
            song,
            assignment: assigner.assign(i),
        })
        .collect();

    let workers = opts.worker_count(jobs.len());
    info!(
        theme = %opts.theme,
        workers,
        "Generating {} QR codes using {workers} parallel workers",
        jobs.len()
    );

    let output_dir: &Path = &opts.output_dir;
    let report = run_tasks(
        WHAT,
        &jobs,
        workers,
        opts.progress_every,
        |job| format!("song {}", job.song.id),
        |job| {
            let a = job.assignment;
            let artwork = processor.process(a.artwork, a.background, true);
            let style = CodeStyle {
                background: a.background,
                foreground: a.foreground,
            };
            generate_one(job.song, style, artwork.path(), output_dir).map(|_| ())
        },
    )?;

    info!("{}", report.summary());
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
