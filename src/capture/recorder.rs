// SPDX-License-Identifier: GPL-3.0-only

//! Recording collaborator
//!
//! A [`Recorder`] accumulates encoded data chunks while a recording session
//! is active and finalizes them into a single playable buffer on stop. The
//! default [`ChunkRecorder`] simply concatenates chunks; actual codec work is
//! out of scope and delegated to whatever feeds the chunks.

use crate::errors::CaptureError;
use tracing::debug;

/// Recording session boundary
pub trait Recorder {
    /// Begin a recording session; fails if one is already active
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Whether a recording session is active
    fn is_recording(&self) -> bool;

    /// Data callback: a new encoded chunk arrived. Empty chunks are dropped.
    fn append_chunk(&mut self, chunk: &[u8]);

    /// Stop the session and finalize accumulated chunks into one buffer
    fn finish(&mut self) -> Result<Vec<u8>, CaptureError>;
}

/// Default recorder: accumulates chunks in memory and concatenates on finish
#[derive(Debug, Default)]
pub struct ChunkRecorder {
    /// `Some` while a session is active
    chunks: Option<Vec<Vec<u8>>>,
}

impl ChunkRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recorder for ChunkRecorder {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.chunks.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }
        debug!("Recording session started");
        self.chunks = Some(Vec::new());
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.chunks.is_some()
    }

    fn append_chunk(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        if let Some(chunks) = self.chunks.as_mut() {
            chunks.push(chunk.to_vec());
        }
    }

    fn finish(&mut self) -> Result<Vec<u8>, CaptureError> {
        let chunks = self.chunks.take().ok_or(CaptureError::NotRecording)?;
        let total: usize = chunks.iter().map(Vec::len).sum();
        debug!(chunks = chunks.len(), bytes = total, "Recording finalized");
        Ok(chunks.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_twice_is_rejected() {
        let mut recorder = ChunkRecorder::new();
        recorder.start().unwrap();
        assert!(matches!(
            recorder.start(),
            Err(CaptureError::AlreadyRecording)
        ));
    }

    #[test]
    fn test_chunks_concatenate_in_order() {
        let mut recorder = ChunkRecorder::new();
        recorder.start().unwrap();
        recorder.append_chunk(&[1, 2]);
        recorder.append_chunk(&[]);
        recorder.append_chunk(&[3]);
        assert_eq!(recorder.finish().unwrap(), vec![1, 2, 3]);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_finish_without_start_fails() {
        let mut recorder = ChunkRecorder::new();
        assert!(matches!(recorder.finish(), Err(CaptureError::NotRecording)));
    }

    #[test]
    fn test_chunks_outside_session_are_dropped() {
        let mut recorder = ChunkRecorder::new();
        recorder.append_chunk(&[9, 9]);
        recorder.start().unwrap();
        assert_eq!(recorder.finish().unwrap(), Vec::<u8>::new());
    }
}
