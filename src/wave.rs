//! Construction of the sample buffer played by the converter.

use crate::config;

pub type Buffer = [u16; config::wave::SAMPLES_PER_PERIOD];

/// First quarter-period of a sine wave, scaled by 10_000.
///
/// The other three quadrants are produced by reflecting and negating this
/// table, so only 16 entries need to be stored.
const QUARTER_SINE_X10K: [u32; 16] = [
    0, 1045, 2079, 3090, 4067, 5000, 5877, 6691, 7431, 8090, 8660, 9135, 9510, 9781, 9945, 10000,
];

/// Write one full sine period, centered on the mid-scale output code.
#[inline(never)]
pub fn fill_with_sine(buffer: &mut Buffer) {
    let mid = u32::from(config::wave::OUT_MID);
    for (i, sample) in buffer.iter_mut().enumerate() {
        let value = match i {
            0..=14 => mid + mid * QUARTER_SINE_X10K[i] / 10_000,
            // mid + mid overshoots the counter range by one code,
            // so the peak is pinned to the maximum instead
            15 => u32::from(config::wave::OUT_MAX),
            16..=30 => mid + mid * QUARTER_SINE_X10K[30 - i] / 10_000,
            31..=45 => mid - mid * QUARTER_SINE_X10K[i - 30] / 10_000,
            _ => mid - mid * QUARTER_SINE_X10K[60 - i] / 10_000,
        };
        *sample = value as u16;
    }
}

/// Write all zeros, muting the output without stopping playback.
#[inline(never)]
pub fn fill_with_silence(buffer: &mut Buffer) {
    buffer.fill(0);
}
