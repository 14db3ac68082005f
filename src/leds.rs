//! Cosmetic LED chase across two 8-LED banks, paced inversely to pitch.

use crate::config;

/// Masks to apply to the LED driver: set `on`, clear `off`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, defmt::Format)]
pub struct LedStep {
    pub on: u16,
    pub off: u16,
}

pub struct LedAnimator {
    counter: u32,
    index: u32,
    lit: u16,
}

impl LedAnimator {
    pub const fn new() -> Self {
        Self {
            counter: 0,
            index: 0,
            lit: 0,
        }
    }

    /// Advance one loop tick. Returns the masks to push to the driver when
    /// the pattern steps, `None` otherwise. Higher frequencies step more
    /// often; the `+ 1` keeps the divisor nonzero at the upper bound.
    pub fn tick(&mut self, freq_hz: u32) -> Option<LedStep> {
        self.counter = self.counter.wrapping_add(config::leds::COUNTER_STEP);
        if self.counter % (config::tone::FREQ_HZ_MAX + 1 - freq_hz) != 0 {
            return None;
        }

        self.index = self.index.wrapping_add(1);
        let position = self.index % 8;
        let forward = self.index % 16 < 8;

        // one bit in each bank, mirrored, so the lit pair appears to bounce
        let high = if forward {
            1 << (15 - position)
        } else {
            1 << (8 + position)
        };
        let low = if forward {
            1 << position
        } else {
            1 << (7 - position)
        };

        let off = self.lit;
        self.lit = (high | low) as u16;
        Some(LedStep { on: self.lit, off })
    }
}

impl Default for LedAnimator {
    fn default() -> Self {
        Self::new()
    }
}
