// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture and library subsystems

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Album/photo collection errors
    Library(LibraryError),
    /// Capture session errors
    Capture(CaptureError),
    /// Export/share errors
    Export(ExportError),
    /// Persistence errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Errors raised by the library consistency engine
#[derive(Debug, Clone)]
pub enum LibraryError {
    /// Input failed validation (e.g. empty album name)
    Validation(String),
    /// Operation referenced an album or photo that does not exist
    NotFound(String),
}

/// Errors raised by the capture session controller
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Capture device unavailable or access denied
    AcquisitionFailed(String),
    /// No live stream to read frames from
    NoStream,
    /// No frame available for capture
    NoFrameAvailable(String),
    /// Still-image encoding failed
    EncodingFailed(String),
    /// No album selected, or the selected album no longer exists
    NoTargetAlbum,
    /// Recording already in progress
    AlreadyRecording,
    /// No recording in progress to stop
    NotRecording,
}

/// Errors raised by the export/share collaborator
#[derive(Debug, Clone)]
pub enum ExportError {
    /// System-level sharing is unavailable on this device
    ShareUnavailable,
    /// Direct download fallback failed
    DownloadFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Library(e) => write!(f, "Library error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            LibraryError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::AcquisitionFailed(msg) => {
                write!(f, "Camera acquisition failed: {}", msg)
            }
            CaptureError::NoStream => write!(f, "No active camera stream"),
            CaptureError::NoFrameAvailable(msg) => {
                write!(f, "No frame available for capture: {}", msg)
            }
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CaptureError::NoTargetAlbum => write!(f, "No target album for capture"),
            CaptureError::AlreadyRecording => write!(f, "Recording already in progress"),
            CaptureError::NotRecording => write!(f, "No recording in progress"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::ShareUnavailable => write!(f, "Sharing not available"),
            ExportError::DownloadFailed(msg) => write!(f, "Download failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for LibraryError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for ExportError {}

// Conversions from sub-errors to AppError
impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        AppError::Library(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
