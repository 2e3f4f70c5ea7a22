// SPDX-License-Identifier: GPL-3.0-only

//! Capture session: device abstraction, shooting-mode state machine,
//! still/video pipelines and the per-session review buffer

pub mod controller;
pub mod device;
pub mod flash;
pub mod photo;
pub mod recorder;
pub mod session;

pub use controller::{CaptureController, SessionState, ShootingMode, ShutterAction};
pub use device::{
    CameraDevice, CameraStream, FacingDirection, Frame, StreamConstraints, SyntheticCamera,
};
pub use flash::{FlashDecider, FlashMode, RandomFlashDecider, TimerMode};
pub use recorder::{ChunkRecorder, Recorder};
pub use session::{RemovedCapture, ReviewBuffer};
