//! Perceptual luminance and legibility decisions.

use crate::foundation::core::Rgb8;

/// Luminance at which black-on-color and white-on-color reach the same WCAG contrast ratio.
///
/// Solves `(L + 0.05) / 0.05 = 1.05 / (L + 0.05)`, i.e. `sqrt(1.05 * 0.05) - 0.05`, rounded.
pub const CONTRAST_THRESHOLD: f64 = 0.179;

/// WCAG 2.0 relative luminance of an sRGB color, in `[0, 1]`.
pub fn relative_luminance(color: Rgb8) -> f64 {
    fn linear(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// `true` when white text reads better than black on `color`.
pub fn is_dark(color: Rgb8) -> bool {
    relative_luminance(color) < CONTRAST_THRESHOLD
}

/// Foreground (code module) color for a background: white on dark, black on light.
pub fn foreground_for(background: Rgb8) -> Rgb8 {
    if is_dark(background) {
        Rgb8::WHITE
    } else {
        Rgb8::BLACK
    }
}

/// Tonal variant of `background` used to recolor black artwork fills.
///
/// Dark backgrounds are lightened (scaled up plus a small additive boost so near-black still
/// moves), light backgrounds are scaled down. Channels truncate toward zero and clamp to
/// `0..=255`.
pub fn secondary_fill(background: Rgb8) -> Rgb8 {
    let l = relative_luminance(background);
    let (factor, boost) = if l < CONTRAST_THRESHOLD {
        let boost = (15.0 - (l * 50.0).trunc()).max(0.0);
        (1.0 + (0.5 - l) * 0.8, boost)
    } else {
        (1.0 - (l - 0.5) * 5.0, 0.0)
    };

    let scale = |c: u8| -> u8 { (f64::from(c) * factor + boost).clamp(0.0, 255.0) as u8 };
    Rgb8::new(
        scale(background.r),
        scale(background.g),
        scale(background.b),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/theme/contrast.rs"]
mod tests;
