use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Song;
use crate::foundation::error::HitsterResult;

/// Supplier of the ordered song list for a run.
///
/// Music-service connectors implement this; the rendering core only consumes the result.
pub trait SongSource {
    /// Fetch all songs, in card order.
    fn songs(&self) -> HitsterResult<Vec<Song>>;
}

/// Songs stored as a JSON array on disk (e.g. `generated/songs.json`).
#[derive(Clone, Debug)]
pub struct JsonSongSource {
    path: PathBuf,
}

impl JsonSongSource {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SongSource for JsonSongSource {
    fn songs(&self) -> HitsterResult<Vec<Song>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read songs from '{}'", self.path.display()))?;
        let songs = serde_json::from_str(&text)
            .with_context(|| format!("parse songs in '{}'", self.path.display()))?;
        Ok(songs)
    }
}

impl<T: SongSource + ?Sized> SongSource for &T {
    fn songs(&self) -> HitsterResult<Vec<Song>> {
        (**self).songs()
    }
}

impl SongSource for Vec<Song> {
    fn songs(&self) -> HitsterResult<Vec<Song>> {
        Ok(self.clone())
    }
}
