// SPDX-License-Identifier: GPL-3.0-only

//! Album and photo records

use crate::media::MediaRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque album identity, assigned at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
    /// Allocate a fresh identity
    pub fn new() -> Self {
        AlbumId(Uuid::new_v4().to_string())
    }

    /// Wrap a pre-existing raw identity (seeded records)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        AlbumId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AlbumId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque photo identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn new() -> Self {
        PhotoId(Uuid::new_v4().to_string())
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        PhotoId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

/// A named collection of photos with derived cover and count.
///
/// `photo_count` and `cover_photo_url` are derived fields maintained by the
/// library engine: the count always equals the number of photos whose
/// `album_id` matches, and the cover is the album's first photo in current
/// collection order (absent iff the album is empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    /// Non-empty display name
    pub name: String,
    /// Accent color token, e.g. "#3B82F6"
    pub theme_color: String,
    /// Derived: number of photos in this album
    pub photo_count: usize,
    /// Derived: reference shown as the album thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_url: Option<MediaRef>,
}

/// A single captured still or video record.
///
/// Created only by a successful capture (or seeding), never mutated in
/// place, destroyed only by explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub album_id: AlbumId,
    pub url: MediaRef,
    /// Capture instant; non-decreasing with insertion order in normal use
    pub timestamp: DateTime<Utc>,
}
