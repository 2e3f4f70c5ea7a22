// SPDX-License-Identifier: GPL-3.0-only

//! Media references and the transient capture-buffer registry
//!
//! Captured stills and videos live in memory until they are deleted; the
//! [`BlobStore`] owns those buffers and hands out opaque [`MediaRef`]s to
//! everything else. Seeded library entries reference remote URLs instead and
//! are never backed by a local buffer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Scheme prefix for transient still-image captures
const STILL_SCHEME: &str = "mem:image/";

/// Scheme prefix for transient video captures
const VIDEO_SCHEME: &str = "mem:video/";

/// Opaque reference to a media resource.
///
/// Three shapes exist: `mem:image/<uuid>` for captured stills,
/// `mem:video/<uuid>` for captured videos, and plain remote URLs for seeded
/// content. The `mem:` forms are backed by a buffer in the [`BlobStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    /// Reference to a remote media resource (not locally backed)
    pub fn remote(url: impl Into<String>) -> Self {
        MediaRef(url.into())
    }

    fn new_still() -> Self {
        MediaRef(format!("{}{}", STILL_SCHEME, Uuid::new_v4()))
    }

    fn new_video() -> Self {
        MediaRef(format!("{}{}", VIDEO_SCHEME, Uuid::new_v4()))
    }

    /// Whether this reference points at a video
    pub fn is_video(&self) -> bool {
        self.0.starts_with(VIDEO_SCHEME)
    }

    /// Whether this reference is backed by a transient local buffer
    pub fn is_transient(&self) -> bool {
        self.0.starts_with(STILL_SCHEME) || self.0.starts_with(VIDEO_SCHEME)
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Releases the device-level resource backing a transient media reference.
///
/// Must be called exactly once per reference on deletion; releasing a
/// reference that was never allocated (or already released) is a logged
/// no-op rather than an error.
pub trait MediaReleaser {
    fn release(&mut self, media: &MediaRef);
}

/// Registry of transient, locally allocated capture buffers.
///
/// The capture pipeline inserts encoded bytes here and receives a
/// [`MediaRef`]; the library engine releases entries when the corresponding
/// photos are deleted.
#[derive(Debug, Default)]
pub struct BlobStore {
    blobs: HashMap<MediaRef, Arc<Vec<u8>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an encoded still image and return its reference
    pub fn insert_still(&mut self, bytes: Vec<u8>) -> MediaRef {
        let media = MediaRef::new_still();
        debug!(media = %media, size = bytes.len(), "Registered still capture");
        self.blobs.insert(media.clone(), Arc::new(bytes));
        media
    }

    /// Register a finalized video buffer and return its reference
    pub fn insert_video(&mut self, bytes: Vec<u8>) -> MediaRef {
        let media = MediaRef::new_video();
        debug!(media = %media, size = bytes.len(), "Registered video capture");
        self.blobs.insert(media.clone(), Arc::new(bytes));
        media
    }

    /// Look up the bytes backing a transient reference
    pub fn get(&self, media: &MediaRef) -> Option<Arc<Vec<u8>>> {
        self.blobs.get(media).cloned()
    }

    /// Number of live buffers
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl MediaReleaser for BlobStore {
    fn release(&mut self, media: &MediaRef) {
        if !media.is_transient() {
            return;
        }
        if self.blobs.remove(media).is_some() {
            debug!(media = %media, "Released capture buffer");
        } else {
            warn!(media = %media, "Release requested for unknown or already-released buffer");
        }
    }
}
