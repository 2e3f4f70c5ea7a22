// SPDX-License-Identifier: GPL-3.0-only

//! Persistence collaborator for the album and photo collections
//!
//! The engine treats the store as an opaque put/get service: one combined
//! write after every mutation, one load at startup. The default [`JsonStore`]
//! keeps a single JSON document in the platform data directory.

use crate::errors::AppError;
use crate::library::types::{Album, Photo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persistence boundary for the library engine
pub trait LibraryStore {
    /// Persist both collections as a single combined write
    fn save(&mut self, albums: &[Album], photos: &[Photo]) -> Result<(), AppError>;

    /// Load previously saved collections; `None` if no saved state exists
    fn load(&mut self) -> Result<Option<(Vec<Album>, Vec<Photo>)>, AppError>;
}

/// On-disk document shape (camelCase, matching the photo/album records)
#[derive(Serialize, Deserialize)]
struct SavedLibrary {
    albums: Vec<Album>,
    photos: Vec<Photo>,
}

/// JSON file store under the platform data directory
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    /// Store at the default location: `<data_dir>/shutterbox/library.json`
    pub fn default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        JsonStore {
            path: base.join("shutterbox").join("library.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryStore for JsonStore {
    fn save(&mut self, albums: &[Album], photos: &[Photo]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let doc = SavedLibrary {
            albums: albums.to_vec(),
            photos: photos.to_vec(),
        };
        let bytes =
            serde_json::to_vec_pretty(&doc).map_err(|e| AppError::Storage(e.to_string()))?;
        std::fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), albums = albums.len(), photos = photos.len(), "Saved library");
        Ok(())
    }

    fn load(&mut self) -> Result<Option<(Vec<Album>, Vec<Photo>)>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        let doc: SavedLibrary =
            serde_json::from_slice(&bytes).map_err(|e| AppError::Storage(e.to_string()))?;
        debug!(path = %self.path.display(), albums = doc.albums.len(), photos = doc.photos.len(), "Loaded library");
        Ok(Some((doc.albums, doc.photos)))
    }
}

/// In-memory store for tests; counts writes so no-op guarantees can be checked
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<(Vec<Album>, Vec<Photo>)>,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been invoked
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// The most recently saved collections, if any
    pub fn last_saved(&self) -> Option<&(Vec<Album>, Vec<Photo>)> {
        self.saved.as_ref()
    }
}

impl LibraryStore for MemoryStore {
    fn save(&mut self, albums: &[Album], photos: &[Photo]) -> Result<(), AppError> {
        self.saved = Some((albums.to_vec(), photos.to_vec()));
        self.save_count += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<(Vec<Album>, Vec<Photo>)>, AppError> {
        Ok(self.saved.clone())
    }
}
