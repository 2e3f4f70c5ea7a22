// SPDX-License-Identifier: GPL-3.0-only

//! Export/share collaborator
//!
//! Finished captures are offered for system-level sharing with a direct
//! download as the fallback. Export is best-effort everywhere: failures are
//! logged and never affect capture or library state.

use crate::errors::ExportError;
use crate::media::MediaRef;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Export boundary for finished captures
pub trait Exporter {
    /// Offer a capture for sharing or download.
    ///
    /// `bytes` carries the encoded buffer for transient captures and is
    /// `None` for remote references.
    fn offer(&mut self, media: &MediaRef, bytes: Option<Arc<Vec<u8>>>) -> Result<(), ExportError>;
}

/// Download fallback: writes transient captures into a downloads directory,
/// named `Capture-<millis>.{jpg,webm}` like the original save-to-device path
#[derive(Debug)]
pub struct DownloadExporter {
    dir: PathBuf,
}

impl DownloadExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DownloadExporter { dir: dir.into() }
    }

    /// Exporter writing into the platform downloads directory
    pub fn default_location() -> Self {
        let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        DownloadExporter { dir }
    }
}

impl Exporter for DownloadExporter {
    fn offer(&mut self, media: &MediaRef, bytes: Option<Arc<Vec<u8>>>) -> Result<(), ExportError> {
        let Some(bytes) = bytes else {
            // Remote references have nothing local to download
            debug!(media = %media, "Skipping export of remote reference");
            return Ok(());
        };
        let extension = if media.is_video() { "webm" } else { "jpg" };
        let name = format!("Capture-{}.{}", Utc::now().timestamp_millis(), extension);
        let path = self.dir.join(name);

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::DownloadFailed(e.to_string()))?;
        std::fs::write(&path, bytes.as_slice())
            .map_err(|e| ExportError::DownloadFailed(e.to_string()))?;
        info!(path = %path.display(), "Capture saved to device");
        Ok(())
    }
}

/// Exporter that discards everything; for tests and headless runs
#[derive(Debug, Default)]
pub struct NullExporter;

impl Exporter for NullExporter {
    fn offer(
        &mut self,
        _media: &MediaRef,
        _bytes: Option<Arc<Vec<u8>>>,
    ) -> Result<(), ExportError> {
        Ok(())
    }
}
