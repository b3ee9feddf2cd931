use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{HitsterError, HitsterResult};

/// Palette used by themes that do not declare one.
pub const DEFAULT_PALETTE: &[Rgb8] = &[Rgb8::WHITE];

/// Enumerated card themes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Plain white cards, black codes.
    #[default]
    BlackWhite,
    /// Five saturated colors, no artwork.
    Colored,
    /// Muted autumn palette with pumpkin, bat and tombstone artwork.
    Halloween,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Self; 3] = [Self::BlackWhite, Self::Colored, Self::Halloween];

    /// Case-sensitive identifier used in configuration.
    pub fn id(self) -> &'static str {
        self.def().id
    }

    fn def(self) -> &'static ThemeDef {
        match self {
            Self::BlackWhite => &BLACK_WHITE,
            Self::Colored => &COLORED,
            Self::Halloween => &HALLOWEEN,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = HitsterError;

    fn from_str(s: &str) -> HitsterResult<Self> {
        Self::ALL.into_iter().find(|t| t.id() == s).ok_or_else(|| {
            let known = Self::ALL.map(Self::id).join(", ");
            HitsterError::configuration(format!("unknown theme \"{s}\" (expected one of: {known})"))
        })
    }
}

/// What a piece of theme artwork is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtworkPurpose {
    /// Embedded at the center of each song's code image.
    QrOverlay,
    /// Free-standing card decoration.
    Decoration,
}

struct ThemeDef {
    id: &'static str,
    palette: &'static [Rgb8],
    /// File-name prefixes of `*.svg` artwork; each prefix group is sorted, groups concatenate.
    qr_artwork: &'static [&'static str],
    decoration_artwork: &'static [&'static str],
}

static BLACK_WHITE: ThemeDef = ThemeDef {
    id: "black-white",
    palette: &[],
    qr_artwork: &[],
    decoration_artwork: &[],
};

static COLORED: ThemeDef = ThemeDef {
    id: "colored",
    palette: &[
        Rgb8::new(214, 40, 40),  // red
        Rgb8::new(247, 127, 0),  // orange
        Rgb8::new(255, 183, 3),  // yellow
        Rgb8::new(42, 157, 143), // teal
        Rgb8::new(157, 78, 221), // purple
    ],
    qr_artwork: &[],
    decoration_artwork: &[],
};

static HALLOWEEN: ThemeDef = ThemeDef {
    id: "halloween",
    palette: &[
        Rgb8::new(38, 42, 32),
        Rgb8::new(67, 40, 26),
        Rgb8::new(63, 92, 93),
        Rgb8::new(182, 87, 24),
        Rgb8::new(159, 188, 191),
    ],
    qr_artwork: &["pumpkin_"],
    decoration_artwork: &["bat_", "tombstone_"],
};

/// Read-only catalog of themes plus the directory their artwork lives in.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    images_dir: PathBuf,
}

impl ThemeRegistry {
    /// Registry resolving artwork under `images_dir`.
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// Artwork root directory.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Resolve a theme identifier.
    pub fn lookup(&self, id: &str) -> HitsterResult<Theme> {
        id.parse()
    }

    /// Ordered, non-empty palette of `theme`.
    pub fn palette(&self, theme: Theme) -> &'static [Rgb8] {
        let palette = theme.def().palette;
        if palette.is_empty() {
            DEFAULT_PALETTE
        } else {
            palette
        }
    }

    /// Ordered artwork files of `theme` for `purpose`. May be empty.
    ///
    /// Themes without artwork never touch the filesystem. A theme that declares artwork but
    /// whose images directory is missing is a configuration error.
    pub fn artwork(&self, theme: Theme, purpose: ArtworkPurpose) -> HitsterResult<Vec<PathBuf>> {
        let def = theme.def();
        let prefixes = match purpose {
            ArtworkPurpose::QrOverlay => def.qr_artwork,
            ArtworkPurpose::Decoration => def.decoration_artwork,
        };
        if prefixes.is_empty() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.images_dir).map_err(|e| {
            HitsterError::configuration(format!(
                "images directory '{}' for theme {theme} not readable: {e}",
                self.images_dir.display()
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                HitsterError::configuration(format!(
                    "list '{}': {e}",
                    self.images_dir.display()
                ))
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".svg") {
                files.push(name);
            }
        }
        files.sort();

        let mut out = Vec::new();
        for prefix in prefixes {
            out.extend(
                files
                    .iter()
                    .filter(|name| name.starts_with(prefix))
                    .map(|name| self.images_dir.join(name)),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
