// SPDX-License-Identifier: GPL-3.0-only

//! Flash and timer modes
//!
//! Flash is simulated: "firing" raises a transient full-frame overlay in the
//! viewfinder for a moment, and no flash hardware is engaged. Auto mode runs
//! a randomized trial behind the [`FlashDecider`] trait so tests can force
//! either branch.

use crate::constants::AUTO_FLASH_PROBABILITY;
use rand::Rng;

/// Flash operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    /// Flash never fires
    #[default]
    Off,
    /// Flash fires on every still capture
    On,
    /// Flash fires based on a randomized trial
    Auto,
}

impl FlashMode {
    /// Cycle to the next mode: Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }
}

/// Shutter delay mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Capture immediately
    #[default]
    Off,
    /// Three-second countdown
    Short,
    /// Ten-second countdown
    Long,
}

impl TimerMode {
    /// Cycle to the next mode: 0 -> 3 -> 10 -> 0 seconds
    pub fn next(self) -> Self {
        match self {
            TimerMode::Off => TimerMode::Short,
            TimerMode::Short => TimerMode::Long,
            TimerMode::Long => TimerMode::Off,
        }
    }

    /// Countdown length in seconds
    pub fn seconds(self) -> u32 {
        match self {
            TimerMode::Off => 0,
            TimerMode::Short => 3,
            TimerMode::Long => 10,
        }
    }
}

/// Decides whether auto flash fires on a given capture
pub trait FlashDecider {
    fn should_fire(&mut self) -> bool;
}

/// Production decider: a fair randomized trial
#[derive(Debug, Default)]
pub struct RandomFlashDecider;

impl FlashDecider for RandomFlashDecider {
    fn should_fire(&mut self) -> bool {
        rand::thread_rng().gen_bool(AUTO_FLASH_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_cycle() {
        let mut mode = FlashMode::Off;
        mode = mode.next();
        assert_eq!(mode, FlashMode::On);
        mode = mode.next();
        assert_eq!(mode, FlashMode::Auto);
        mode = mode.next();
        assert_eq!(mode, FlashMode::Off);
    }

    #[test]
    fn test_timer_cycle_and_seconds() {
        assert_eq!(TimerMode::Off.seconds(), 0);
        assert_eq!(TimerMode::Off.next(), TimerMode::Short);
        assert_eq!(TimerMode::Short.seconds(), 3);
        assert_eq!(TimerMode::Short.next(), TimerMode::Long);
        assert_eq!(TimerMode::Long.seconds(), 10);
        assert_eq!(TimerMode::Long.next(), TimerMode::Off);
    }
}
