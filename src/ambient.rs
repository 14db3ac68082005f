//! Ambient light mode derivation.

use crate::config;

/// Tracks whether the display should use its dark palette.
///
/// The comparison is a bare threshold with no hysteresis band, so a light
/// level sitting exactly at the threshold can flip the mode on consecutive
/// ticks.
pub struct AmbientMonitor {
    dark: bool,
}

impl AmbientMonitor {
    pub fn new(initial_lux: u32) -> Self {
        Self {
            dark: is_dark(initial_lux),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Fold in one light sample; returns whether the mode flipped.
    pub fn update(&mut self, lux: u32) -> bool {
        let dark = is_dark(lux);
        let changed = dark != self.dark;
        self.dark = dark;
        changed
    }
}

fn is_dark(lux: u32) -> bool {
    lux < config::light::DARK_THRESHOLD_LUX
}
