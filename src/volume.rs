//! Volume level tracking and the pulse protocol spoken by the amplifier.
//!
//! The amplifier has two inputs (a level-select line and a clock line) and no
//! read-back: the only way to know the output level is to count the pulses we
//! have sent. `VolumeState` is that count and must move in lock-step with the
//! actuator.

use crate::config;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct VolumeState {
    level: u8,
}

impl VolumeState {
    /// `level` must already be validated against the configured bounds.
    pub const fn new(level: u8) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Returns whether the level moved; a step at the bound clamps to a
    /// no-op, which is not a change worth persisting.
    pub fn step_up(&mut self) -> bool {
        if self.level < config::volume::LEVEL_MAX {
            self.level += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the level moved.
    pub fn step_down(&mut self) -> bool {
        if self.level > config::volume::LEVEL_MIN {
            self.level -= 1;
            true
        } else {
            false
        }
    }
}

/// Drives the amplifier's level-select and clock lines.
///
/// Each phase is held for [`config::volume::PULSE_HOLD_MS`] so the external
/// latch registers the edge; the delay is part of the protocol, not slack.
pub struct VolumeActuator<SEL, CLK> {
    select: SEL,
    clock: CLK,
}

impl<SEL, CLK, E> VolumeActuator<SEL, CLK>
where
    SEL: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
{
    /// Both lines are driven to their rest state (low).
    pub fn new(mut select: SEL, mut clock: CLK) -> Result<Self, E> {
        select.set_low()?;
        clock.set_low()?;
        Ok(Self { select, clock })
    }

    /// One increase pulse: raise the select line, clock it in, release.
    pub fn step_up(&mut self, delay: &mut impl DelayMs<u8>) -> Result<(), E> {
        self.select.set_high()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        self.clock.set_high()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        self.clock.set_low()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        self.select.set_low()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        Ok(())
    }

    /// One decrease pulse. The select line already rests low, so only the
    /// clock needs to move.
    pub fn step_down(&mut self, delay: &mut impl DelayMs<u8>) -> Result<(), E> {
        self.select.set_low()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        self.clock.set_high()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        self.clock.set_low()?;
        delay.delay_ms(config::volume::PULSE_HOLD_MS);
        Ok(())
    }

    /// Drive the device to a known level without read-back: floor it with
    /// `LEVEL_MAX` unconditional decrease pulses (the hardware saturates at
    /// its minimum), then climb exactly `level` steps.
    pub fn reset_to(&mut self, level: u8, delay: &mut impl DelayMs<u8>) -> Result<(), E> {
        for _ in 0..config::volume::LEVEL_MAX {
            self.step_down(delay)?;
        }
        for _ in 0..level {
            self.step_up(delay)?;
        }
        Ok(())
    }
}
