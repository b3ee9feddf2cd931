//! Deterministic round-robin assignment of palette colors and artwork to songs.
//!
//! Position `i` maps to `palette[i % P]` and `artwork[i % A]` independently. There is no cursor:
//! every query is a pure function of the index, so assignments can be computed from any thread
//! in any order and always agree.

use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{HitsterError, HitsterResult};
use crate::theme::contrast::foreground_for;
use crate::theme::registry::{ArtworkPurpose, Theme, ThemeRegistry};

/// Visual identity of the song at one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Position in the song list.
    pub index: usize,
    /// Card/code background.
    pub background: Rgb8,
    /// Code module color, contrasting with `background`.
    pub foreground: Rgb8,
    /// Source artwork, absent when the theme has none.
    pub artwork: Option<&'a Path>,
}

/// Cyclic assignment over a palette and an artwork list of independent lengths.
#[derive(Clone, Debug)]
pub struct CyclicAssigner {
    palette: Vec<Rgb8>,
    artwork: Vec<PathBuf>,
}

impl CyclicAssigner {
    /// Assigner over explicit lists. The palette must be non-empty; the artwork list may be.
    pub fn new(palette: Vec<Rgb8>, artwork: Vec<PathBuf>) -> HitsterResult<Self> {
        if palette.is_empty() {
            return Err(HitsterError::configuration(
                "palette must contain at least one color",
            ));
        }
        Ok(Self { palette, artwork })
    }

    /// Assigner for `theme`, drawing artwork for `purpose` from `registry`.
    pub fn for_theme(
        registry: &ThemeRegistry,
        theme: Theme,
        purpose: ArtworkPurpose,
    ) -> HitsterResult<Self> {
        Self::new(
            registry.palette(theme).to_vec(),
            registry.artwork(theme, purpose)?,
        )
    }

    /// Palette being cycled.
    pub fn palette(&self) -> &[Rgb8] {
        &self.palette
    }

    /// Artwork being cycled.
    pub fn artwork_list(&self) -> &[PathBuf] {
        &self.artwork
    }

    /// Background color at `index`.
    pub fn background(&self, index: usize) -> Rgb8 {
        self.palette[index % self.palette.len()]
    }

    /// Artwork at `index`, or `None` for every index when the list is empty.
    pub fn artwork(&self, index: usize) -> Option<&Path> {
        if self.artwork.is_empty() {
            return None;
        }
        Some(self.artwork[index % self.artwork.len()].as_path())
    }

    /// Full assignment at `index`.
    pub fn assign(&self, index: usize) -> Assignment<'_> {
        let background = self.background(index);
        Assignment {
            index,
            background,
            foreground: foreground_for(background),
            artwork: self.artwork(index),
        }
    }

    /// Endless sequence of assignments starting at index 0.
    ///
    /// Calling this again restarts from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = Assignment<'_>> + '_ {
        (0..).map(move |i| self.assign(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/assign.rs"]
mod tests;
