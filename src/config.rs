use std::path::PathBuf;

use crate::foundation::error::{HitsterError, HitsterResult};
use crate::theme::registry::Theme;

/// Options for a generation run.
#[derive(Clone, Debug)]
pub struct GeneratorOpts {
    /// Card theme.
    pub theme: Theme,
    /// Upper bound on parallel workers.
    pub max_workers: usize,
    /// Destination of per-song code images.
    pub output_dir: PathBuf,
    /// Processed-artwork cache, persisted across runs.
    pub cache_dir: PathBuf,
    /// Source artwork of all themes.
    pub images_dir: PathBuf,
    /// Emit a progress line every this many completions (and on the last one).
    pub progress_every: usize,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            max_workers: 8,
            output_dir: PathBuf::from("generated/qr-codes"),
            cache_dir: PathBuf::from("generated/images"),
            images_dir: PathBuf::from("generator/themes/images"),
            progress_every: 20,
        }
    }
}

impl GeneratorOpts {
    /// Reject settings no run could work with.
    pub fn validate(&self) -> HitsterResult<()> {
        if self.max_workers == 0 {
            return Err(HitsterError::configuration("max_workers must be >= 1"));
        }
        Ok(())
    }

    /// Workers for `items` tasks: `min(max_workers, items, available parallelism)`, at least 1.
    pub fn worker_count(&self, items: usize) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.max_workers.min(items).min(cores).max(1)
    }
}
