//! Tone frequency state and frequency-to-timing translation.

use crate::config;

/// The current tone frequency, kept within configured bounds before any
/// mutation is applied.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ToneState {
    freq_hz: u32,
}

impl ToneState {
    /// `freq_hz` must already be validated against the configured bounds
    /// (settings decoding guarantees this).
    pub const fn new(freq_hz: u32) -> Self {
        Self { freq_hz }
    }

    pub fn freq_hz(&self) -> u32 {
        self.freq_hz
    }

    /// Returns whether the frequency moved; a step at the bound clamps to a
    /// no-op, which is not a change worth persisting.
    pub fn step_up(&mut self) -> bool {
        let before = self.freq_hz;
        self.freq_hz = (self.freq_hz + config::tone::FREQ_HZ_STEP).min(config::tone::FREQ_HZ_MAX);
        self.freq_hz != before
    }

    /// Returns whether the frequency moved.
    pub fn step_down(&mut self) -> bool {
        let before = self.freq_hz;
        self.freq_hz = self
            .freq_hz
            .saturating_sub(config::tone::FREQ_HZ_STEP)
            .max(config::tone::FREQ_HZ_MIN);
        self.freq_hz != before
    }
}

/// Number of pace timer ticks between consecutive samples for a given
/// frequency, rounded to the nearest tick.
///
/// The caller guarantees `freq_hz` is within bounds; static assertions in
/// `config` guarantee the result fits a 16-bit auto-reload register for the
/// whole range.
pub fn pace_interval_ticks(freq_hz: u32) -> u32 {
    let samples_per_sec = freq_hz * config::wave::SAMPLES_PER_PERIOD as u32;
    (config::tone::PACE_CLK_HZ + samples_per_sec / 2) / samples_per_sec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tone::{FREQ_HZ_MAX, FREQ_HZ_MIN};

    #[test]
    fn interval_is_rounded_to_the_nearest_tick() {
        // 9 MHz / (440 * 60) = 340.9...
        assert_eq!(pace_interval_ticks(440), 341);
        // 9 MHz / (800 * 60) = 187.5
        assert_eq!(pace_interval_ticks(800), 188);
    }

    #[test]
    fn interval_fits_the_timer_at_both_bounds() {
        assert_eq!(pace_interval_ticks(FREQ_HZ_MIN), 15_000);
        let fastest = pace_interval_ticks(FREQ_HZ_MAX);
        assert!(fastest >= 2);
        assert!(pace_interval_ticks(FREQ_HZ_MIN) <= u32::from(u16::MAX));
        assert!(fastest <= pace_interval_ticks(FREQ_HZ_MIN));
    }

    #[test]
    fn steps_clamp_at_the_bounds() {
        let mut tone = ToneState::new(FREQ_HZ_MAX - 5);
        assert!(tone.step_up());
        assert_eq!(tone.freq_hz(), FREQ_HZ_MAX);
        assert!(!tone.step_up());
        assert_eq!(tone.freq_hz(), FREQ_HZ_MAX);

        let mut tone = ToneState::new(FREQ_HZ_MIN + 5);
        assert!(tone.step_down());
        assert_eq!(tone.freq_hz(), FREQ_HZ_MIN);
        assert!(!tone.step_down());
        assert_eq!(tone.freq_hz(), FREQ_HZ_MIN);
    }

    #[test]
    fn steps_move_by_the_detent_step() {
        let mut tone = ToneState::new(440);
        assert!(tone.step_down());
        assert_eq!(tone.freq_hz(), 430);
        assert!(tone.step_up());
        assert!(tone.step_up());
        assert_eq!(tone.freq_hz(), 450);
    }

    // clamped detents at a bound must not count as changes, or every further
    // detent would rewrite the settings page with identical contents
    #[test]
    fn repeated_edits_at_a_bound_report_no_change() {
        let mut tone = ToneState::new(FREQ_HZ_MAX);
        for _ in 0..5 {
            assert!(!tone.step_up());
        }
        assert_eq!(tone.freq_hz(), FREQ_HZ_MAX);

        let mut tone = ToneState::new(FREQ_HZ_MIN);
        for _ in 0..5 {
            assert!(!tone.step_down());
        }
        assert_eq!(tone.freq_hz(), FREQ_HZ_MIN);
    }
}
