//! Compile-time configuration.
//!
//! All tunable constants live here, tied together with static assertions so
//! that an inconsistent combination fails the build rather than the bench.

/// Clock configuration
///
/// See clock tree in https://www.st.com/resource/en/datasheet/stm32f103c8.pdf
pub mod clk {
    use fugit::Rate;

    /// Use external oscillator (required to get max 72MHz sysclk)
    pub const HSE_FREQ: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(8);

    /// PLLMUL @ x9 (max 72MHz)
    pub const SYSCLK: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);

    pub const SYSCLK_HZ: u32 = SYSCLK.to_Hz();

    /// APB1 @ /2 (max 36MHz)
    pub const PCLK1: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(36);

    /// APB2 @ /1 (max 72MHz)
    pub const PCLK2: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);

    /// APB1 timers see 2x PCLK1 whenever the APB1 prescaler is not 1.
    pub const TIMCLK1_HZ: u32 = PCLK1.to_Hz() * 2;

    const _: () = assert!(TIMCLK1_HZ == SYSCLK_HZ);
}

/// Main control loop pacing
pub mod tick {
    use crate::time::Duration;

    /// 1ms between loop iterations.
    pub const PERIOD: Duration = Duration::from_ticks(super::clk::SYSCLK_HZ / 1000);
}

/// Waveform table and converter output range
pub mod wave {
    /// Samples per waveform period, and the transfer size of the playback DMA.
    pub const SAMPLES_PER_PERIOD: usize = 60;

    /// The converter is a 10-bit PWM compare register.
    pub const OUT_MAX: u16 = 1023;
    pub const OUT_MID: u16 = 512;

    const _: () = assert!(OUT_MID as u32 * 2 == OUT_MAX as u32 + 1);
}

/// Tone frequency range and pace timer configuration
pub mod tone {
    use super::{clk, wave};

    pub const FREQ_HZ_MIN: u32 = 10;
    pub const FREQ_HZ_MAX: u32 = 800;
    pub const FREQ_HZ_INITIAL: u32 = 440;

    /// Rotary detent step when editing frequency.
    pub const FREQ_HZ_STEP: u32 = 10;

    /// Tick rate of the timer pacing sample transfers to the converter.
    pub const PACE_CLK_HZ: u32 = 9_000_000;

    pub const PACE_PRESCALER: u32 = clk::TIMCLK1_HZ / PACE_CLK_HZ;

    const _: () = assert!(clk::TIMCLK1_HZ % PACE_CLK_HZ == 0);
    const _: () = assert!(PACE_PRESCALER <= u16::MAX as u32 + 1);
    const _: () = assert!(FREQ_HZ_MIN <= FREQ_HZ_INITIAL && FREQ_HZ_INITIAL <= FREQ_HZ_MAX);
    const _: () = assert!(FREQ_HZ_MIN > 0);

    // The slowest and fastest per-sample intervals must fit the 16-bit
    // auto-reload register with at least one tick to spare.
    const _: () =
        assert!(PACE_CLK_HZ / (FREQ_HZ_MIN * wave::SAMPLES_PER_PERIOD as u32) <= u16::MAX as u32);
    const _: () =
        assert!(PACE_CLK_HZ / (FREQ_HZ_MAX * wave::SAMPLES_PER_PERIOD as u32) >= 2);
}

/// Amplifier volume range and pulse timing
pub mod volume {
    pub const LEVEL_MIN: u8 = 0;
    pub const LEVEL_MAX: u8 = 15;
    pub const LEVEL_INITIAL: u8 = 10;

    /// Settling time the amplifier needs to latch each pulse edge.
    pub const PULSE_HOLD_MS: u8 = 1;

    const _: () = assert!(LEVEL_MIN <= LEVEL_INITIAL && LEVEL_INITIAL <= LEVEL_MAX);
}

/// Ambient light threshold
pub mod light {
    /// Below this the display switches to its dark palette. No hysteresis.
    pub const DARK_THRESHOLD_LUX: u32 = 200;
}

/// LED chase animation
pub mod leds {
    /// Added to the animation counter once per loop tick.
    pub const COUNTER_STEP: u32 = 10;
}

/// Screen layout (128x64 monochrome OLED)
pub mod screen {
    pub const WIDTH: u32 = 128;
    pub const HEIGHT: u32 = 64;

    pub const ROW_HEIGHT: u32 = 12;
    pub const FREQ_ROW_Y: i32 = 0;
    pub const VOLUME_ROW_Y: i32 = 12;
    pub const TEXT_X: i32 = 2;
    pub const TEXT_PAD_Y: i32 = 1;

    const _: () = assert!(VOLUME_ROW_Y as u32 + ROW_HEIGHT <= HEIGHT);
}

/// Persisted settings record placement
pub mod store {
    /// Byte offset of the record from the start of flash: the last 1K page,
    /// which `memory.x` excludes from the program image.
    pub const OFFSET: u32 = 0xFC00;

    pub const PAGE_LEN: usize = 1024;

    const _: () = assert!(OFFSET as usize % PAGE_LEN == 0);
}

/// Addresses of devices on the I2C bus
pub mod i2c {
    pub const LIGHT_SENSOR_ADDR: u8 = 0x23;
    pub const LED_DRIVER_ADDR: u8 = 0x60;
}
