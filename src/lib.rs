// SPDX-License-Identifier: GPL-3.0-only

//! Shutterbox - a mobile-style media capture and album library
//!
//! This library provides the core functionality of the application: a
//! capture session controller over an abstract camera device, and a library
//! consistency engine that keeps album/photo collections and their derived
//! fields correct under concurrent create/delete operations.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`capture`]: Capture session controller, device/recorder abstractions,
//!   still pipeline, flash/timer modes and the session review buffer
//! - [`library`]: Album/photo collections, consistency engine, persistence
//! - [`media`]: Media references and the transient capture-buffer registry
//! - [`export`]: Share/download collaborator
//! - [`errors`]: Error taxonomy
//! - [`constants`]: Application-wide constants

pub mod capture;
pub mod constants;
pub mod errors;
pub mod export;
pub mod library;
pub mod media;

// Re-export commonly used types
pub use capture::{
    CaptureController, ChunkRecorder, FacingDirection, FlashMode, RandomFlashDecider, ReviewBuffer,
    SessionState, ShootingMode, ShutterAction, SyntheticCamera, TimerMode,
};
pub use errors::{AppError, AppResult, CaptureError, ExportError, LibraryError};
pub use export::{DownloadExporter, Exporter, NullExporter};
pub use library::{Album, AlbumId, JsonStore, Library, LibraryStore, MemoryStore, Photo, PhotoId};
pub use media::{BlobStore, MediaRef, MediaReleaser};
