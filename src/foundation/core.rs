use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{HitsterError, HitsterResult};

/// Opaque 8-bit sRGB color.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in `[r, g, b]` order.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` form, as written into SVG attributes.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opaque RGBA pixel for this color.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb8 {
    type Err = HitsterError;

    /// Parse `#rgb`, `#rrggbb` (the `#` is optional) or the keywords `black`/`white`.
    fn from_str(s: &str) -> HitsterResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("black") {
            return Ok(Self::BLACK);
        }
        if s.eq_ignore_ascii_case("white") {
            return Ok(Self::WHITE);
        }
        let hex = s.strip_prefix('#').unwrap_or(s);

        fn nibble(c: u8) -> Option<u8> {
            (c as char).to_digit(16).map(|d| d as u8)
        }

        let bytes = hex.as_bytes();
        let parsed = match bytes.len() {
            3 => {
                let mut out = [0u8; 3];
                for (o, &c) in out.iter_mut().zip(bytes) {
                    *o = nibble(c).ok_or_else(|| invalid_hex(s))? * 17;
                }
                out
            }
            6 => {
                let mut out = [0u8; 3];
                for (o, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
                    match (nibble(pair[0]), nibble(pair[1])) {
                        (Some(hi), Some(lo)) => *o = hi * 16 + lo,
                        _ => return Err(invalid_hex(s)),
                    }
                }
                out
            }
            _ => return Err(invalid_hex(s)),
        };

        Ok(Self::new(parsed[0], parsed[1], parsed[2]))
    }
}

fn invalid_hex(s: &str) -> HitsterError {
    HitsterError::configuration(format!(
        "invalid color \"{s}\" (expected #rgb, #rrggbb, black or white)"
    ))
}

/// A song as delivered by a [`SongSource`](crate::SongSource).
///
/// Only `id` and `url` are used by the rendering core; the remaining fields travel along so
/// the song list can be round-tripped for document composition.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Song {
    /// Stable identifier; names the generated code image.
    pub id: String,
    /// Track title.
    #[serde(default)]
    pub title: String,
    /// Performing artists.
    #[serde(default)]
    pub artists: Vec<String>,
    /// Release year, when known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Resolvable playback value encoded into the code image.
    pub url: String,
}

impl Song {
    /// Minimal song with just an id and a playback value.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            artists: Vec::new(),
            year: None,
            url: url.into(),
        }
    }

    /// Value encoded into the scannable code.
    pub fn code_value(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
