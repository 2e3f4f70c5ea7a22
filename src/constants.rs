// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Preferred capture stream width requested from the device
pub const PREFERRED_WIDTH: u32 = 1920;

/// Preferred capture stream height requested from the device
pub const PREFERRED_HEIGHT: u32 = 1080;

/// JPEG encoding quality for still captures (0-100)
pub const JPEG_QUALITY: u8 = 95;

/// How long the simulated full-frame flash overlay stays visible.
///
/// The flash is purely cosmetic; no flash hardware is engaged.
pub const FLASH_OVERLAY: Duration = Duration::from_millis(150);

/// How long a tapped focus point stays on screen before auto-clearing
pub const FOCUS_HOLD: Duration = Duration::from_secs(3);

/// Tick interval shared by the countdown and recording-duration timers
pub const TIMER_TICK: Duration = Duration::from_secs(1);

/// Minimum exposure multiplier
pub const EXPOSURE_MIN: f32 = 0.3;

/// Maximum exposure multiplier
pub const EXPOSURE_MAX: f32 = 2.5;

/// Neutral exposure multiplier (no brightness change)
pub const EXPOSURE_DEFAULT: f32 = 1.0;

/// Probability that auto flash mode fires on a still capture
pub const AUTO_FLASH_PROBABILITY: f64 = 0.5;

/// Clamp an exposure multiplier into the supported range
pub fn clamp_exposure(value: f32) -> f32 {
    value.clamp(EXPOSURE_MIN, EXPOSURE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_exposure_bounds() {
        assert_eq!(clamp_exposure(0.0), EXPOSURE_MIN);
        assert_eq!(clamp_exposure(10.0), EXPOSURE_MAX);
        assert_eq!(clamp_exposure(1.0), 1.0);
    }

    #[test]
    fn test_exposure_range_contains_default() {
        assert!(EXPOSURE_MIN < EXPOSURE_DEFAULT && EXPOSURE_DEFAULT < EXPOSURE_MAX);
    }
}
