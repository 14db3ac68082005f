//! Minimal driver for the BH1750-style ambient light sensor.

use embedded_hal::blocking::i2c::{Read, Write};
use sinebox::config;

const CMD_POWER_ON: u8 = 0x01;
const CMD_CONTINUOUS_HIGH_RES: u8 = 0x10;

/// Power the sensor up and start continuous high-resolution sampling.
pub fn init<I2C, E>(i2c: &mut I2C) -> Result<(), E>
where
    I2C: Write<Error = E>,
{
    i2c.write(config::i2c::LIGHT_SENSOR_ADDR, &[CMD_POWER_ON])?;
    i2c.write(config::i2c::LIGHT_SENSOR_ADDR, &[CMD_CONTINUOUS_HIGH_RES])
}

/// Latest illuminance in lux. The raw count is in 5/6 lux units.
pub fn read_lux<I2C, E>(i2c: &mut I2C) -> Result<u32, E>
where
    I2C: Read<Error = E>,
{
    let mut raw = [0; 2];
    i2c.read(config::i2c::LIGHT_SENSOR_ADDR, &mut raw)?;
    Ok(u32::from(u16::from_be_bytes(raw)) * 10 / 12)
}
