//! Scannable code images: one PNG per song.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use qrcode::{Color, EcLevel, QrCode};
use resvg::tiny_skia;
use tracing::warn;

use crate::assets::svg_raster::{parse_svg, pixmap_to_rgba, rasterize_svg};
use crate::foundation::core::{Rgb8, Song};
use crate::foundation::error::{HitsterError, HitsterResult};
use crate::foundation::io::{PngSpeed, write_png_atomic};

/// Pixels per code module.
pub const MODULE_PX: u32 = 12;

/// Largest share of the code's side length taken by embedded artwork.
///
/// Level-H error correction tolerates roughly 30% damaged codewords; the artwork covers a
/// quarter of the area at most.
pub const ARTWORK_RATIO: f64 = 0.5;

/// Colors of one code image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeStyle {
    /// Canvas color behind the modules.
    pub background: Rgb8,
    /// Module color.
    pub foreground: Rgb8,
}

/// Where the code image for `song` lives inside `output_dir`.
///
/// Song ids become file names, so ids that could escape the directory are rejected.
pub fn code_image_path(output_dir: &Path, song: &Song) -> HitsterResult<PathBuf> {
    let id = song.id.as_str();
    if id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0'])
    {
        return Err(HitsterError::render(format!(
            "song id {id:?} is not usable as a file name"
        )));
    }
    Ok(output_dir.join(format!("{id}.png")))
}

/// Render the module matrix for `value` as filled circles on a solid background.
///
/// The image has no quiet zone; its side is `modules * MODULE_PX`.
pub fn render_code(value: &str, style: CodeStyle) -> HitsterResult<image::RgbaImage> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::H)
        .map_err(|e| HitsterError::render(format!("encode {} bytes: {e}", value.len())))?;
    let modules = code.width() as u32;
    let side = modules * MODULE_PX;

    let mut pixmap = tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| HitsterError::render("failed to allocate code pixmap"))?;
    let bg = style.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));

    let radius = MODULE_PX as f32 / 2.0;
    let mut pb = tiny_skia::PathBuilder::new();
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let x = (i as u32 % modules) as f32;
        let y = (i as u32 / modules) as f32;
        pb.push_circle(
            (x + 0.5) * MODULE_PX as f32,
            (y + 0.5) * MODULE_PX as f32,
            radius,
        );
    }

    if let Some(path) = pb.finish() {
        let fg = style.foreground;
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(fg.r, fg.g, fg.b, 255);
        paint.anti_alias = true;
        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    pixmap_to_rgba(&pixmap)
}

/// Load artwork for embedding. Rasters are decoded directly; SVG sources (unprocessed
/// fallbacks) are rasterized as they are.
fn load_artwork(path: &Path) -> HitsterResult<image::RgbaImage> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let bytes =
            std::fs::read(path).with_context(|| format!("read artwork '{}'", path.display()))?;
        return rasterize_svg(&parse_svg(&bytes)?);
    }
    let img = image::open(path).with_context(|| format!("decode artwork '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Composite `artwork` centered over `canvas`, scaled to fit [`ARTWORK_RATIO`] of its side.
pub fn embed_artwork(canvas: &mut image::RgbaImage, artwork: &image::RgbaImage) {
    let (cw, ch) = canvas.dimensions();
    let (aw, ah) = artwork.dimensions();
    if aw == 0 || ah == 0 {
        return;
    }

    let bound = (f64::from(cw.min(ch)) * ARTWORK_RATIO).floor().max(1.0);
    let scale = (bound / f64::from(aw)).min(bound / f64::from(ah));
    let w = ((f64::from(aw) * scale).round() as u32).max(1);
    let h = ((f64::from(ah) * scale).round() as u32).max(1);

    let scaled = image::imageops::resize(artwork, w, h, image::imageops::FilterType::Lanczos3);
    let x = i64::from((cw - w) / 2);
    let y = i64::from((ch - h) / 2);
    image::imageops::overlay(canvas, &scaled, x, y);
}

/// Render and write the code image for one song.
///
/// Pure given its inputs and the artwork on disk; safe to call concurrently for distinct
/// songs. Artwork that cannot be decoded is skipped with a warning. Returns the written path
/// (`output_dir/{song.id}.png`).
#[tracing::instrument(skip_all, fields(song_id = %song.id))]
pub fn generate_one(
    song: &Song,
    style: CodeStyle,
    artwork: Option<&Path>,
    output_dir: &Path,
) -> HitsterResult<PathBuf> {
    let out = code_image_path(output_dir, song)?;
    let mut img = render_code(song.code_value(), style)?;
    if let Some(artwork) = artwork {
        match load_artwork(artwork) {
            Ok(art) => embed_artwork(&mut img, &art),
            Err(e) => warn!(
                artwork = %artwork.display(),
                error = %e,
                "artwork not embeddable, rendering code without it"
            ),
        }
    }
    write_png_atomic(&out, &img, PngSpeed::Uncompressed)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/qr.rs"]
mod tests;
