// SPDX-License-Identifier: GPL-3.0-only

//! Album and photo library
//!
//! The [`Library`] engine exclusively owns the album and photo collections,
//! keeps the derived fields (photo counts, cover photos) consistent across
//! create/delete operations, and persists through a [`LibraryStore`]
//! collaborator after every mutation.

pub mod engine;
pub mod seed;
pub mod store;
pub mod types;

pub use engine::Library;
pub use store::{JsonStore, LibraryStore, MemoryStore};
pub use types::{Album, AlbumId, Photo, PhotoId};
