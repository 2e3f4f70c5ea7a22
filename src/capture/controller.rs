// SPDX-License-Identifier: GPL-3.0-only

//! Capture session controller
//!
//! Owns the live device stream and the shooting-mode state machine, and
//! emits finished captures to the library engine. The controller itself is a
//! synchronous state machine driven by discrete external events; the shell
//! around it delivers the one-second countdown and recording ticks and the
//! flash/focus clear callbacks.

use crate::capture::device::{
    CameraDevice, CameraStream, FacingDirection, StreamConstraints,
};
use crate::capture::flash::{FlashDecider, FlashMode, TimerMode};
use crate::capture::photo;
use crate::capture::recorder::Recorder;
use crate::capture::session::{RemovedCapture, ReviewBuffer};
use crate::constants::{clamp_exposure, EXPOSURE_DEFAULT};
use crate::errors::CaptureError;
use crate::export::Exporter;
use crate::library::{AlbumId, Library, LibraryStore};
use crate::media::{BlobStore, MediaRef, MediaReleaser};
use tracing::{debug, error, info, warn};

/// Capture session state machine.
///
/// `Ready` is the resting state; there is no terminal state, the session is
/// torn down on close. Acquisition failure leaves the controller in
/// `Acquiring` indefinitely with no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No stream requested yet
    Uninitialized,
    /// Waiting for the capture device
    Acquiring,
    /// Stream live, shutter available
    Ready,
    /// Shutter armed, counting down to the capture action
    CountdownPending {
        /// Seconds left until the capture action fires
        remaining: u32,
    },
    /// A still capture is in flight
    CapturingStill,
    /// Actively recording video
    Recording {
        /// Elapsed recording time for live display
        elapsed_secs: u64,
    },
}

impl SessionState {
    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        matches!(self, SessionState::Recording { .. })
    }

    /// Get the elapsed recording duration
    pub fn elapsed_duration(&self) -> u64 {
        match self {
            SessionState::Recording { elapsed_secs } => *elapsed_secs,
            _ => 0,
        }
    }
}

/// Whether the next shutter activation captures a still or a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShootingMode {
    #[default]
    Photo,
    Video,
}

/// What a shutter activation (or countdown completion) resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum ShutterAction {
    /// Activation was rejected or the capture action failed
    Ignored,
    /// Countdown armed for the given number of seconds
    CountdownStarted(u32),
    /// A still was captured and emitted to the library
    Captured(MediaRef),
    /// Video recording began
    RecordingStarted,
    /// Recording was finalized and emitted to the library
    RecordingStopped(MediaRef),
}

/// Transient tap-to-focus point in viewfinder coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

/// The capture session: device stream, shooting-mode state and per-session
/// capture log
pub struct CaptureController {
    device: Box<dyn CameraDevice>,
    recorder: Box<dyn Recorder>,
    flash_decider: Box<dyn FlashDecider>,
    exporter: Box<dyn Exporter>,
    stream: Option<Box<dyn CameraStream>>,
    constraints: StreamConstraints,
    state: SessionState,
    mode: ShootingMode,
    facing: FacingDirection,
    flash_mode: FlashMode,
    timer_mode: TimerMode,
    /// Simulated flash overlay currently visible
    flash_active: bool,
    exposure: f32,
    focus_point: Option<FocusPoint>,
    selected_album: Option<AlbumId>,
    session: ReviewBuffer,
    blobs: BlobStore,
}

impl CaptureController {
    pub fn new(
        device: Box<dyn CameraDevice>,
        recorder: Box<dyn Recorder>,
        flash_decider: Box<dyn FlashDecider>,
        exporter: Box<dyn Exporter>,
    ) -> Self {
        CaptureController {
            device,
            recorder,
            flash_decider,
            exporter,
            stream: None,
            constraints: StreamConstraints::default(),
            state: SessionState::Uninitialized,
            mode: ShootingMode::Photo,
            facing: FacingDirection::Back,
            flash_mode: FlashMode::Off,
            timer_mode: TimerMode::Off,
            flash_active: false,
            exposure: EXPOSURE_DEFAULT,
            focus_point: None,
            selected_album: None,
            session: ReviewBuffer::new(),
            blobs: BlobStore::new(),
        }
    }

    // =========================================================================
    // Stream lifecycle
    // =========================================================================

    /// Acquire a device stream for the current facing direction.
    ///
    /// On failure the controller stays in `Acquiring`; recovery is
    /// user-initiated by re-entering the capture screen.
    pub fn open(&mut self) {
        self.teardown_stream();
        self.state = SessionState::Acquiring;
        match self.device.acquire(self.facing, &self.constraints) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = SessionState::Ready;
                info!(facing = ?self.facing, "Camera stream ready");
            }
            Err(e) => {
                // No retry and no error state: the viewfinder stays blank
                error!(error = %e, "Camera access failed");
            }
        }
    }

    /// Switch between the front and back camera.
    ///
    /// Always tears the current stream down before re-acquiring, so rapid
    /// toggling never leaks a stream.
    pub fn toggle_facing(&mut self) {
        if self.state.is_recording() {
            warn!("Facing change ignored while recording");
            return;
        }
        self.facing = self.facing.toggled();
        self.open();
    }

    fn teardown_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }

    /// Tear the session down: stop the stream, cancel pending timers, drop
    /// any unfinished recording. Idempotent, and safe if no stream was ever
    /// acquired.
    pub fn close(&mut self) {
        self.teardown_stream();
        if self.recorder.is_recording() {
            match self.recorder.finish() {
                Ok(bytes) => {
                    debug!(bytes = bytes.len(), "Discarded unfinished recording on close")
                }
                Err(e) => warn!(error = %e, "Failed to discard unfinished recording"),
            }
        }
        self.flash_active = false;
        self.focus_point = None;
        self.state = SessionState::Uninitialized;
    }

    // =========================================================================
    // Shutter and timers
    // =========================================================================

    /// Handle a shutter activation.
    ///
    /// While recording this finalizes the recording. With a non-zero timer it
    /// arms the countdown; re-activation during a countdown is rejected, so
    /// at most one capture action is in flight per activation.
    pub fn press_shutter<S: LibraryStore>(&mut self, library: &mut Library<S>) -> ShutterAction {
        match &self.state {
            SessionState::Recording { .. } => self.stop_recording(library),
            SessionState::CountdownPending { .. } => {
                warn!("Shutter pressed during countdown, rejected");
                ShutterAction::Ignored
            }
            SessionState::Ready => {
                let delay = self.timer_mode.seconds();
                if delay > 0 {
                    self.state = SessionState::CountdownPending { remaining: delay };
                    info!(delay, "Countdown started");
                    ShutterAction::CountdownStarted(delay)
                } else {
                    self.execute_capture_action(library)
                }
            }
            SessionState::Uninitialized
            | SessionState::Acquiring
            | SessionState::CapturingStill => {
                warn!(state = ?self.state, "Shutter pressed without a ready stream, rejected");
                ShutterAction::Ignored
            }
        }
    }

    /// One-second countdown tick. On reaching zero the capture action for
    /// the current shooting mode fires and the state returns to `Ready` (or
    /// `Recording`).
    pub fn tick_countdown<S: LibraryStore>(
        &mut self,
        library: &mut Library<S>,
    ) -> Option<ShutterAction> {
        let SessionState::CountdownPending { remaining } = &mut self.state else {
            return None;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return None;
        }
        self.state = SessionState::Ready;
        Some(self.execute_capture_action(library))
    }

    /// Seconds left on an armed countdown
    pub fn countdown(&self) -> Option<u32> {
        match &self.state {
            SessionState::CountdownPending { remaining } => Some(*remaining),
            _ => None,
        }
    }

    /// One-second recording tick: bumps the live duration counter and pulls
    /// the next data chunk off the stream.
    pub fn tick_recording(&mut self) {
        let SessionState::Recording { elapsed_secs } = &mut self.state else {
            return;
        };
        *elapsed_secs += 1;
        if let Some(stream) = self.stream.as_mut() {
            match stream.frame() {
                Ok(frame) => self.recorder.append_chunk(&frame.rgba),
                Err(e) => warn!(error = %e, "No recording chunk this tick"),
            }
        }
    }

    /// Elapsed recording time for live display
    pub fn recording_duration(&self) -> u64 {
        self.state.elapsed_duration()
    }

    fn execute_capture_action<S: LibraryStore>(
        &mut self,
        library: &mut Library<S>,
    ) -> ShutterAction {
        match self.mode {
            ShootingMode::Photo => match self.capture_still(library) {
                Ok(media) => ShutterAction::Captured(media),
                Err(e) => {
                    error!(error = %e, "Still capture failed");
                    self.state = SessionState::Ready;
                    ShutterAction::Ignored
                }
            },
            ShootingMode::Video => match self.start_recording() {
                Ok(()) => ShutterAction::RecordingStarted,
                Err(e) => {
                    error!(error = %e, "Failed to start recording");
                    ShutterAction::Ignored
                }
            },
        }
    }

    // =========================================================================
    // Still capture
    // =========================================================================

    fn capture_still<S: LibraryStore>(
        &mut self,
        library: &mut Library<S>,
    ) -> Result<MediaRef, CaptureError> {
        let Some(album_id) = self.selected_album.clone() else {
            return Err(CaptureError::NoTargetAlbum);
        };
        let frame = match self.stream.as_mut() {
            Some(stream) => stream.frame()?,
            None => return Err(CaptureError::NoStream),
        };
        self.state = SessionState::CapturingStill;

        // Simulated flash: decided up front, like the original; the shell
        // clears the overlay after FLASH_OVERLAY
        if self.flash_mode == FlashMode::On
            || (self.flash_mode == FlashMode::Auto && self.flash_decider.should_fire())
        {
            self.flash_active = true;
        }

        let bytes = photo::process_frame(&frame, self.exposure, self.facing.is_self_facing())
            .and_then(|img| photo::encode_jpeg(&img))
            .inspect_err(|_| self.state = SessionState::Ready)?;

        let media = self.blobs.insert_still(bytes);
        if let Err(e) = library.add_photo(&album_id, media.clone()) {
            warn!(error = %e, "Capture dropped, target album is gone");
            self.blobs.release(&media);
            self.state = SessionState::Ready;
            return Err(CaptureError::NoTargetAlbum);
        }
        self.session.push_front(media.clone());
        if let Err(e) = self.exporter.offer(&media, self.blobs.get(&media)) {
            warn!(error = %e, "Export failed");
        }
        info!(media = %media, "Captured still");
        self.state = SessionState::Ready;
        Ok(media)
    }

    // =========================================================================
    // Video recording
    // =========================================================================

    fn start_recording(&mut self) -> Result<(), CaptureError> {
        if self.stream.is_none() {
            return Err(CaptureError::NoStream);
        }
        self.recorder.start()?;
        self.state = SessionState::Recording { elapsed_secs: 0 };
        info!("Recording started");
        Ok(())
    }

    fn stop_recording<S: LibraryStore>(&mut self, library: &mut Library<S>) -> ShutterAction {
        let bytes = match self.recorder.finish() {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to finalize recording");
                self.state = SessionState::Ready;
                return ShutterAction::Ignored;
            }
        };
        // Leaving the Recording state also resets the duration counter
        self.state = SessionState::Ready;

        let Some(album_id) = self.selected_album.clone() else {
            warn!("Recording finished without a target album, discarded");
            return ShutterAction::Ignored;
        };
        let media = self.blobs.insert_video(bytes);
        if let Err(e) = library.add_photo(&album_id, media.clone()) {
            warn!(error = %e, "Recording dropped, target album is gone");
            self.blobs.release(&media);
            return ShutterAction::Ignored;
        }
        self.session.push_front(media.clone());
        if let Err(e) = self.exporter.offer(&media, self.blobs.get(&media)) {
            warn!(error = %e, "Export failed");
        }
        info!(media = %media, "Recording captured");
        ShutterAction::RecordingStopped(media)
    }

    // =========================================================================
    // Modes and adjustments
    // =========================================================================

    /// Select the shooting mode; ignored while recording
    pub fn set_mode(&mut self, mode: ShootingMode) {
        if self.state.is_recording() {
            warn!("Mode change ignored while recording");
            return;
        }
        self.mode = mode;
    }

    /// Cycle flash: Off -> On -> Auto -> Off
    pub fn cycle_flash_mode(&mut self) {
        self.flash_mode = self.flash_mode.next();
        debug!(mode = ?self.flash_mode, "Flash mode");
    }

    /// Cycle timer: 0 -> 3 -> 10 -> 0 seconds
    pub fn cycle_timer_mode(&mut self) {
        self.timer_mode = self.timer_mode.next();
        debug!(mode = ?self.timer_mode, "Timer mode");
    }

    /// Designate a transient focus point; the shell clears it after
    /// FOCUS_HOLD via [`CaptureController::clear_focus`]
    pub fn tap_focus(&mut self, x: f32, y: f32) {
        self.focus_point = Some(FocusPoint { x, y });
    }

    pub fn clear_focus(&mut self) {
        self.focus_point = None;
    }

    /// Set the exposure multiplier, clamped to the supported range; applies
    /// to the live preview and the next captured still
    pub fn set_exposure(&mut self, value: f32) {
        self.exposure = clamp_exposure(value);
    }

    pub fn reset_exposure(&mut self) {
        self.exposure = EXPOSURE_DEFAULT;
    }

    /// Clear the simulated flash overlay (after FLASH_OVERLAY has elapsed)
    pub fn clear_flash(&mut self) {
        self.flash_active = false;
    }

    /// Choose the album receiving subsequent captures
    pub fn select_album(&mut self, album_id: AlbumId) {
        self.selected_album = Some(album_id);
    }

    // =========================================================================
    // Session review
    // =========================================================================

    /// Delete a session capture: removes it from the review buffer and from
    /// the canonical library (releasing its buffer) in one step, keeping
    /// both in sync. Confirmation is the caller's concern.
    pub fn delete_session_capture<S: LibraryStore>(
        &mut self,
        index: usize,
        library: &mut Library<S>,
    ) -> Option<RemovedCapture> {
        let removed = self.session.remove(index)?;
        library.delete_photo(&removed.media, &mut self.blobs);
        Some(removed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> ShootingMode {
        self.mode
    }

    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    pub fn flash_mode(&self) -> FlashMode {
        self.flash_mode
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn flash_active(&self) -> bool {
        self.flash_active
    }

    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    pub fn focus_point(&self) -> Option<FocusPoint> {
        self.focus_point
    }

    pub fn selected_album(&self) -> Option<&AlbumId> {
        self.selected_album.as_ref()
    }

    /// The per-session capture log
    pub fn session(&self) -> &ReviewBuffer {
        &self.session
    }

    /// The transient capture-buffer registry
    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }
}
