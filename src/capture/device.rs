// SPDX-License-Identifier: GPL-3.0-only

//! Capture-device collaborator
//!
//! The controller talks to the camera through the [`CameraDevice`] and
//! [`CameraStream`] traits so it can run against real hardware, the built-in
//! [`SyntheticCamera`], or test doubles. A stream is the sole source of live
//! frames (and audio) and is exclusively owned by the controller for its
//! lifetime.

use crate::constants::{PREFERRED_HEIGHT, PREFERRED_WIDTH};
use crate::errors::CaptureError;
use tracing::debug;

/// Which way the capture device faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingDirection {
    /// Self-facing (selfie) camera; previews and stills are mirrored
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl FacingDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            FacingDirection::Front => FacingDirection::Back,
            FacingDirection::Back => FacingDirection::Front,
        }
    }

    /// Whether captures from this direction get the horizontal mirror
    pub fn is_self_facing(self) -> bool {
        matches!(self, FacingDirection::Front)
    }
}

/// Requested stream parameters
#[derive(Debug, Clone)]
pub struct StreamConstraints {
    /// Ideal frame width
    pub width: u32,
    /// Ideal frame height
    pub height: u32,
    /// Whether to open an audio track alongside video
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        StreamConstraints {
            width: PREFERRED_WIDTH,
            height: PREFERRED_HEIGHT,
            audio: true,
        }
    }
}

/// A single frame read from the live stream, tightly packed RGBA
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major RGBA
    pub rgba: Vec<u8>,
}

/// A live device stream handed out by [`CameraDevice::acquire`]
pub trait CameraStream {
    /// Read the current frame
    fn frame(&mut self) -> Result<Frame, CaptureError>;

    /// Stop all tracks and release the underlying device resources.
    /// Must be safe to call more than once.
    fn stop(&mut self);

    /// Whether the stream has been stopped
    fn is_stopped(&self) -> bool;
}

/// The capture hardware boundary
pub trait CameraDevice {
    /// Acquire a live stream matching the facing direction and constraints
    fn acquire(
        &mut self,
        facing: FacingDirection,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError>;
}

/// Deterministic frame source standing in for camera hardware.
///
/// Produces a moving gradient; the front camera is tinted warm and the back
/// camera cool so facing changes are visible in captures.
#[derive(Debug, Default)]
pub struct SyntheticCamera;

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CameraDevice for SyntheticCamera {
    fn acquire(
        &mut self,
        facing: FacingDirection,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        debug!(?facing, width = constraints.width, height = constraints.height, "Opening synthetic stream");
        Ok(Box::new(SyntheticStream {
            facing,
            width: constraints.width,
            height: constraints.height,
            tick: 0,
            stopped: false,
        }))
    }
}

/// Stream produced by [`SyntheticCamera`]
#[derive(Debug)]
pub struct SyntheticStream {
    facing: FacingDirection,
    width: u32,
    height: u32,
    tick: u64,
    stopped: bool,
}

impl CameraStream for SyntheticStream {
    fn frame(&mut self) -> Result<Frame, CaptureError> {
        if self.stopped {
            return Err(CaptureError::NoStream);
        }
        self.tick = self.tick.wrapping_add(1);
        let shift = (self.tick % 256) as u32;
        let mut rgba = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let horizontal = ((x * 255 / self.width.max(1)) + shift) % 256;
                let vertical = (y * 255 / self.height.max(1)) % 256;
                match self.facing {
                    FacingDirection::Front => {
                        rgba.extend_from_slice(&[horizontal as u8, vertical as u8, 64, 255]);
                    }
                    FacingDirection::Back => {
                        rgba.extend_from_slice(&[64, vertical as u8, horizontal as u8, 255]);
                    }
                }
            }
        }
        Ok(Frame {
            width: self.width,
            height: self.height,
            rgba,
        })
    }

    fn stop(&mut self) {
        if !self.stopped {
            debug!(facing = ?self.facing, "Stopping synthetic stream");
            self.stopped = true;
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}
