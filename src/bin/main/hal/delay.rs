//! Busy-wait delay provider.
//!
//! SysTick is claimed by the RTIC monotonic, so short protocol delays are
//! implemented as cycle-counted spins instead.

use embedded_hal::blocking::delay::DelayMs;

pub struct CycleDelay {
    cycles_per_ms: u32,
}

impl CycleDelay {
    pub const fn new(sysclk_hz: u32) -> Self {
        Self {
            cycles_per_ms: sysclk_hz / 1000,
        }
    }
}

impl DelayMs<u8> for CycleDelay {
    fn delay_ms(&mut self, ms: u8) {
        cortex_m::asm::delay(self.cycles_per_ms * u32::from(ms));
    }
}
