use std::path::PathBuf;

use tracing::info;

use crate::assets::processor::AssetProcessor;
use crate::config::GeneratorOpts;
use crate::foundation::core::Rgb8;
use crate::foundation::error::HitsterResult;
use crate::render::batch::{BatchReport, run_tasks};
use crate::theme::registry::{ArtworkPurpose, ThemeRegistry};

struct DecorationJob {
    asset: PathBuf,
    background: Rgb8,
}

/// Theme every decoration artwork against every palette color, filling the artwork cache.
///
/// The document compiler picks decorations up from the cache directory by their
/// `{stem}_{r}_{g}_{b}.png` names. Failures are reported per image and never stop the batch.
pub fn render_decorations(
    registry: &ThemeRegistry,
    processor: &AssetProcessor,
    opts: &GeneratorOpts,
) -> HitsterResult<BatchReport> {
    opts.validate()?;
    let artwork = registry.artwork(opts.theme, ArtworkPurpose::Decoration)?;
    let palette = registry.palette(opts.theme);

    let jobs: Vec<DecorationJob> = artwork
        .iter()
        .flat_map(|asset| {
            palette.iter().map(move |&background| DecorationJob {
                asset: asset.clone(),
                background,
            })
        })
        .collect();

    if jobs.is_empty() {
        info!(theme = %opts.theme, "No decoration images for this theme");
    }

    let workers = opts.worker_count(jobs.len());
    let report = run_tasks(
        "decoration images",
        &jobs,
        workers,
        opts.progress_every,
        |job| {
            format!(
                "image {} on {}",
                job.asset.display(),
                job.background.hex()
            )
        },
        |job| {
            processor
                .try_process(&job.asset, job.background, false)
                .map(|_| ())
        },
    )?;

    if report.total > 0 {
        info!("{}", report.summary());
    }
    Ok(report)
}
