// SPDX-License-Identifier: GPL-3.0-only

//! Library consistency engine
//!
//! Owns the album and photo collections. Photos are kept in an ordered
//! sequence, most recent first: every new photo is inserted at the front, and
//! an album's cover is whichever of its photos is first in that order. Both
//! derived fields (count, cover) are recomputed from the remaining collection
//! after a delete, never adjusted incrementally.
//!
//! Every mutating operation ends with a single combined write through the
//! [`LibraryStore`] collaborator.

use crate::errors::LibraryError;
use crate::library::seed::seeded_library;
use crate::library::store::LibraryStore;
use crate::library::types::{Album, AlbumId, Photo, PhotoId};
use crate::media::{MediaRef, MediaReleaser};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// The album/photo collections and their persistence lifecycle
pub struct Library<S: LibraryStore> {
    albums: Vec<Album>,
    /// Ordered most recent first; new photos are inserted at the front
    photos: Vec<Photo>,
    store: S,
}

impl<S: LibraryStore> Library<S> {
    /// Hydrate from the store, seeding defaults when no saved state exists.
    ///
    /// A load failure is logged and treated like an empty store so the
    /// process can still start.
    pub fn load(mut store: S) -> Self {
        let (albums, photos) = match store.load() {
            Ok(Some(collections)) => collections,
            Ok(None) => {
                info!("No saved library found, seeding defaults");
                seeded_library()
            }
            Err(e) => {
                error!(error = %e, "Failed to load library, seeding defaults");
                seeded_library()
            }
        };
        Library {
            albums,
            photos,
            store,
        }
    }

    /// All albums, in creation order
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// All photos, most recent first
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Look up an album by id
    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == *id)
    }

    /// Look up an album by display name
    pub fn album_by_name(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name == name)
    }

    /// Photos belonging to one album, in collection order
    pub fn photos_in<'a>(&'a self, id: &'a AlbumId) -> impl Iterator<Item = &'a Photo> {
        self.photos.iter().filter(move |p| p.album_id == *id)
    }

    /// Size of the photo collection
    pub fn total_photos(&self) -> usize {
        self.photos.len()
    }

    /// Create a new empty album.
    ///
    /// Fails with [`LibraryError::Validation`] if the name is empty; callers
    /// are expected to reject empty names before invoking.
    pub fn create_album(
        &mut self,
        name: &str,
        theme_color: &str,
    ) -> Result<Album, LibraryError> {
        if name.trim().is_empty() {
            return Err(LibraryError::Validation(
                "album name must not be empty".to_string(),
            ));
        }
        let album = Album {
            id: AlbumId::new(),
            name: name.to_string(),
            theme_color: theme_color.to_string(),
            photo_count: 0,
            cover_photo_url: None,
        };
        info!(album = %album.id.as_str(), name, "Created album");
        self.albums.push(album.clone());
        self.persist();
        Ok(album)
    }

    /// Record a finished capture in the given album.
    ///
    /// Inserts the new photo at the front of the collection, bumps the
    /// album's count and sets the cover only if the album has none yet.
    pub fn add_photo(
        &mut self,
        album_id: &AlbumId,
        media: MediaRef,
    ) -> Result<Photo, LibraryError> {
        let Some(album) = self.albums.iter_mut().find(|a| a.id == *album_id) else {
            warn!(album = %album_id.as_str(), "Cannot add photo: album not found");
            return Err(LibraryError::NotFound(format!(
                "album {}",
                album_id.as_str()
            )));
        };

        let photo = Photo {
            id: PhotoId::new(),
            album_id: album_id.clone(),
            url: media.clone(),
            timestamp: Utc::now(),
        };
        album.photo_count += 1;
        if album.cover_photo_url.is_none() {
            album.cover_photo_url = Some(media);
        }
        self.photos.insert(0, photo.clone());
        self.persist();
        Ok(photo)
    }

    /// Remove every photo whose reference is in `media`.
    ///
    /// An empty set is a strict no-op: no persistence write, no resource
    /// release. Otherwise the derived fields of every touched album are
    /// recomputed from the post-deletion collection, state is persisted, and
    /// each transient reference in the set is released exactly once (the set
    /// guarantees deduplication).
    pub fn delete_photos(&mut self, media: &HashSet<MediaRef>, releaser: &mut dyn MediaReleaser) {
        if media.is_empty() {
            return;
        }

        let touched: HashSet<AlbumId> = self
            .photos
            .iter()
            .filter(|p| media.contains(&p.url))
            .map(|p| p.album_id.clone())
            .collect();

        self.photos.retain(|p| !media.contains(&p.url));
        for album_id in &touched {
            self.recompute_derived(album_id);
        }
        info!(deleted = media.len(), albums_touched = touched.len(), "Deleted photos");
        self.persist();

        for m in media {
            if m.is_transient() {
                releaser.release(m);
            }
        }
    }

    /// Single-photo convenience form of [`Library::delete_photos`]
    pub fn delete_photo(&mut self, media: &MediaRef, releaser: &mut dyn MediaReleaser) {
        let mut set = HashSet::with_capacity(1);
        set.insert(media.clone());
        self.delete_photos(&set, releaser);
    }

    /// Remove an album and all of its photos.
    ///
    /// Unknown ids are a logged no-op. Navigation away from a deleted album
    /// that is currently on screen is the caller's concern.
    pub fn delete_album(&mut self, album_id: &AlbumId, releaser: &mut dyn MediaReleaser) {
        if !self.albums.iter().any(|a| a.id == *album_id) {
            warn!(album = %album_id.as_str(), "Cannot delete album: not found");
            return;
        }

        let removed: HashSet<MediaRef> = self
            .photos
            .iter()
            .filter(|p| p.album_id == *album_id)
            .map(|p| p.url.clone())
            .collect();

        self.albums.retain(|a| a.id != *album_id);
        self.photos.retain(|p| p.album_id != *album_id);
        info!(album = %album_id.as_str(), photos = removed.len(), "Deleted album");
        self.persist();

        for m in &removed {
            if m.is_transient() {
                releaser.release(m);
            }
        }
    }

    /// Recompute `photo_count` and `cover_photo_url` for one album from the
    /// current photo collection. The cover is the album's first photo in
    /// collection order, i.e. the most recently added survivor.
    fn recompute_derived(&mut self, album_id: &AlbumId) {
        let count = self.photos.iter().filter(|p| p.album_id == *album_id).count();
        let cover = self
            .photos
            .iter()
            .find(|p| p.album_id == *album_id)
            .map(|p| p.url.clone());
        if let Some(album) = self.albums.iter_mut().find(|a| a.id == *album_id) {
            album.photo_count = count;
            album.cover_photo_url = cover;
        }
    }

    /// Persist both collections as one combined write.
    ///
    /// A failed save leaves the in-memory collections untouched and fully
    /// consistent; durability is best-effort and the error is logged.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.albums, &self.photos) {
            error!(error = %e, "Failed to persist library");
        }
    }
}
