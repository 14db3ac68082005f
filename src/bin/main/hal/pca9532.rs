//! Driver for the PCA9532 16-LED controller behind the chase animation.

use embedded_hal::blocking::i2c::Write;
use sinebox::config;

/// First LED selector register; bit 4 enables register auto-increment.
const REG_LS0: u8 = 0x06;
const AUTO_INCREMENT: u8 = 0x10;

/// Two selector bits per LED; 0b01 drives the LED on.
const LS_ON: u8 = 0b01;

pub struct Pca9532 {
    lit: u16,
}

impl Pca9532 {
    pub const fn new() -> Self {
        Self { lit: 0 }
    }

    /// Apply `on`/`off` masks to the shadow state and push all four selector
    /// registers in one auto-incremented write.
    pub fn set<I2C, E>(&mut self, i2c: &mut I2C, on: u16, off: u16) -> Result<(), E>
    where
        I2C: Write<Error = E>,
    {
        self.lit = (self.lit & !off) | on;

        let mut frame = [0; 5];
        frame[0] = REG_LS0 | AUTO_INCREMENT;
        for led in 0..16 {
            if self.lit & (1 << led) != 0 {
                frame[1 + led / 4] |= LS_ON << ((led % 4) * 2);
            }
        }
        i2c.write(config::i2c::LED_DRIVER_ADDR, &frame)
    }
}
