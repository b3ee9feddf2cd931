//! Hitster renders themed song cards.
//!
//! A run resolves a [`Theme`] to its palette and artwork, deals colors and artwork to songs
//! cyclically, and renders one scannable code image per song with the themed artwork
//! embedded at its center. Decoration artwork is themed against every palette color into a
//! persistent cache for the document compiler.
//!
//! - Resolve themes through a [`ThemeRegistry`]
//! - Theme artwork with an [`AssetProcessor`]
//! - Render codes in bulk with [`generate_qr_codes`], or one at a time with [`generate_one`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod render;
mod source;
mod theme;

pub use crate::foundation::core::{Rgb8, Song};
pub use crate::foundation::error::{HitsterError, HitsterResult};
pub use crate::foundation::io::prepare_output_dir;

pub use crate::theme::assign::{Assignment, CyclicAssigner};
pub use crate::theme::contrast::{
    CONTRAST_THRESHOLD, foreground_for, is_dark, relative_luminance, secondary_fill,
};
pub use crate::theme::registry::{ArtworkPurpose, DEFAULT_PALETTE, Theme, ThemeRegistry};

pub use crate::assets::processor::{AssetProcessor, Processed};
pub use crate::assets::recolor::{OUTLINE_PADDING, OUTLINE_STROKE_WIDTH};
pub use crate::assets::svg_raster::{parse_svg, rasterize_svg};

pub use crate::render::batch::{BatchReport, TaskFailure, generate_qr_codes};
pub use crate::render::decorations::render_decorations;
pub use crate::render::qr::{
    ARTWORK_RATIO, CodeStyle, MODULE_PX, code_image_path, embed_artwork, generate_one,
    render_code,
};

pub use crate::config::GeneratorOpts;
pub use crate::source::{JsonSongSource, SongSource};
