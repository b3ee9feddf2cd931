use crate::foundation::error::{HitsterError, HitsterResult};

/// Largest raster side produced from an SVG. Larger intrinsic sizes are rejected rather than
/// allocated.
const MAX_DIM: u32 = 16_384;

/// Parse SVG bytes into a render tree.
pub fn parse_svg(bytes: &[u8]) -> HitsterResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| HitsterError::processing(format!("parse svg tree: {e}")))
}

/// Pixel size of `tree` at its intrinsic resolution.
pub fn raster_size(tree: &usvg::Tree) -> HitsterResult<(u32, u32)> {
    fn to_px(v: f32) -> HitsterResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(HitsterError::processing("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(HitsterError::processing(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

/// Rasterize `tree` onto a transparent canvas at its intrinsic size.
///
/// The result is straight (non-premultiplied) RGBA, ready for PNG encoding.
pub fn rasterize_svg(tree: &usvg::Tree) -> HitsterResult<image::RgbaImage> {
    let (width, height) = raster_size(tree)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| HitsterError::processing("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    pixmap_to_rgba(&pixmap)
}

/// Convert a premultiplied pixmap into a straight-alpha image.
pub(crate) fn pixmap_to_rgba(pixmap: &resvg::tiny_skia::Pixmap) -> HitsterResult<image::RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| HitsterError::processing("pixmap buffer size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
