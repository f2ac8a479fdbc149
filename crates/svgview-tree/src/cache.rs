//! Per-folder image cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use svgview_core::ImageFile;

/// Assets found under each visited folder at its last scan.
///
/// Grows with every folder visited; only [`FolderImageCache::clear`] shrinks it.
#[derive(Debug, Default, Clone)]
pub struct FolderImageCache {
    entries: HashMap<PathBuf, Vec<ImageFile>>,
}

impl FolderImageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the set for `folder`, replacing any earlier entry.
    pub fn insert(&mut self, folder: impl Into<PathBuf>, images: Vec<ImageFile>) {
        self.entries.insert(folder.into(), images);
    }

    /// Cached set for `folder`, empty if it was never visited.
    pub fn get(&self, folder: &Path) -> &[ImageFile] {
        self.entries.get(folder).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if `folder` has been visited since the last clear.
    pub fn contains(&self, folder: &Path) -> bool {
        self.entries.contains_key(folder)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached folders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
