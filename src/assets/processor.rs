use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::assets::recolor::themed_document;
use crate::assets::svg_doc::SvgElement;
use crate::assets::svg_raster::{parse_svg, rasterize_svg};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{HitsterError, HitsterResult};
use crate::foundation::io::{PngSpeed, ensure_dir, write_png_atomic};

/// Outcome of theming one artwork file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Processed {
    /// Themed raster in the cache directory (freshly rendered or reused).
    Raster(PathBuf),
    /// Theming failed; the untouched source asset is used instead.
    Fallback(PathBuf),
    /// No usable artwork.
    Unavailable,
}

impl Processed {
    /// Path to embed, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Raster(p) | Self::Fallback(p) => Some(p),
            Self::Unavailable => None,
        }
    }
}

/// Themes vector artwork for a background color and caches the raster on disk.
///
/// Cache entries are keyed by `(asset stem, background, outline)` and are never invalidated:
/// an existing entry is returned as-is, even if the source asset changed since.
#[derive(Clone, Debug)]
pub struct AssetProcessor {
    cache_dir: PathBuf,
}

impl AssetProcessor {
    /// Processor writing into `cache_dir` (created on first use).
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location for `asset` themed against `background`.
    ///
    /// `{stem}_{r}_{g}_{b}[_outline].png`. Path separators and NUL in the stem become `-`; every
    /// other character is kept.
    pub fn cache_path(&self, asset: &Path, background: Rgb8, outline: bool) -> PathBuf {
        let stem = asset
            .file_stem()
            .map(|s| file_safe(&s.to_string_lossy()))
            .unwrap_or_else(|| "asset".to_owned());
        let Rgb8 { r, g, b } = background;
        let suffix = if outline { "_outline" } else { "" };
        self.cache_dir.join(format!("{stem}_{r}_{g}_{b}{suffix}.png"))
    }

    /// Theme `asset` for `background`, degrading instead of failing.
    ///
    /// Missing or unreadable artwork yields [`Processed::Unavailable`]; parse and rasterize
    /// failures are logged and yield [`Processed::Fallback`] with the source path.
    pub fn process(&self, asset: Option<&Path>, background: Rgb8, outline: bool) -> Processed {
        let Some(asset) = asset else {
            return Processed::Unavailable;
        };

        match self.try_process(asset, background, outline) {
            Ok(path) => Processed::Raster(path),
            Err(e @ HitsterError::AssetUnavailable(_)) => {
                warn!(asset = %asset.display(), error = %e, "artwork unavailable, continuing without it");
                Processed::Unavailable
            }
            Err(e) => {
                warn!(asset = %asset.display(), error = %e, "failed to process artwork, using original");
                Processed::Fallback(asset.to_path_buf())
            }
        }
    }

    /// Theme `asset` for `background`, returning the cached raster path or the failure.
    #[tracing::instrument(skip(self), fields(asset = %asset.display()))]
    pub fn try_process(
        &self,
        asset: &Path,
        background: Rgb8,
        outline: bool,
    ) -> HitsterResult<PathBuf> {
        if !asset.is_file() {
            return Err(HitsterError::asset_unavailable(format!(
                "'{}' does not exist",
                asset.display()
            )));
        }

        let cached = self.cache_path(asset, background, outline);
        if cached.is_file() {
            debug!(path = %cached.display(), "reusing cached artwork");
            return Ok(cached);
        }

        let text = std::fs::read_to_string(asset).map_err(|e| {
            HitsterError::asset_unavailable(format!("read '{}': {e}", asset.display()))
        })?;
        let source = SvgElement::parse(&text)?;
        let themed = themed_document(&source, background, outline);
        let tree = parse_svg(themed.to_xml().as_bytes())?;
        let img = rasterize_svg(&tree)?;

        ensure_dir(&self.cache_dir)?;
        write_png_atomic(&cached, &img, PngSpeed::Default)
            .map_err(|e| HitsterError::processing(format!("write '{}': {e}", cached.display())))?;
        debug!(path = %cached.display(), "rendered artwork");
        Ok(cached)
    }
}

fn file_safe(s: &str) -> String {
    let out: String = s
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect();
    if out.is_empty() {
        "asset".to_owned()
    } else {
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/processor.rs"]
mod tests;
