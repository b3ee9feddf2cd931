use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use image::ImageEncoder as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{HitsterError, HitsterResult};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// PNG encoding effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PngSpeed {
    /// Stored deflate blocks, no filtering. Used for per-song code images.
    Uncompressed,
    /// Library default trade-off. Used for cached artwork.
    Default,
}

/// Create `dir` (and parents), mapping failures to [`HitsterError::Setup`].
pub(crate) fn ensure_dir(dir: &Path) -> HitsterResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        HitsterError::setup(format!("create directory '{}': {e}", dir.display()))
    })
}

/// Make `dir` an existing directory, optionally emptying it of previous output first.
pub fn prepare_output_dir(dir: &Path, clear: bool) -> HitsterResult<()> {
    if clear && dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| {
            HitsterError::setup(format!("clear directory '{}': {e}", dir.display()))
        })?;
        tracing::debug!(dir = %dir.display(), "cleared output directory");
    }
    ensure_dir(dir)
}

/// Encode `img` as PNG and move it into place at `path`.
///
/// The bytes are written to a uniquely named sibling first and renamed over `path`, so readers
/// only ever see either no file or a complete one. Concurrent writers of the same path race
/// harmlessly: the last rename wins and all candidates are complete files.
pub(crate) fn write_png_atomic(
    path: &Path,
    img: &image::RgbaImage,
    speed: PngSpeed,
) -> HitsterResult<()> {
    let tmp = tmp_sibling(path);
    let res = encode_png(&tmp, img, speed).and_then(|()| {
        std::fs::rename(&tmp, path)
            .with_context(|| format!("move '{}' into place", path.display()))
    });
    if res.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    res.map_err(HitsterError::from)
}

fn encode_png(path: &Path, img: &image::RgbaImage, speed: PngSpeed) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(file);
    let encoder = match speed {
        PngSpeed::Uncompressed => PngEncoder::new_with_quality(
            &mut w,
            CompressionType::Uncompressed,
            FilterType::NoFilter,
        ),
        PngSpeed::Default => PngEncoder::new(&mut w),
    };
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("encode png '{}'", path.display()))?;
    w.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/io.rs"]
mod tests;
