//! Extensions to the `stm32f1xx-hal` Hardware Abstraction Layer.

use display_interface_spi::SPIInterface;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;
use stm32f1xx_hal::device::{I2C2, SPI2};
use stm32f1xx_hal::i2c::BlockingI2c;
use stm32f1xx_hal::spi::{Spi, Spi2NoRemap};

pub mod delay;
pub mod input;
pub mod light;
pub mod pca9532;
pub mod store;
pub mod wavegen;

#[allow(non_camel_case_types)]
pub mod pins {
    use stm32f1xx_hal::gpio::{
        Alternate, Floating, Input, OpenDrain, Output, Pin, PullUp, PushPull, CRH, CRL,
    };

    pub type A0_ROTARY_CLK = Pin<Input<PullUp>, CRL, 'A', 0>;
    pub type A1_ROTARY_DIR = Pin<Input<PullUp>, CRL, 'A', 1>;
    pub type A2_AMP_SELECT = Pin<Output<PushPull>, CRL, 'A', 2>;
    pub type A3_AMP_CLOCK = Pin<Output<PushPull>, CRL, 'A', 3>;
    pub type A4_AMP_SHUTDOWN = Pin<Output<PushPull>, CRL, 'A', 4>;
    pub type A8_TIM1C1_WAVE = Pin<Alternate<PushPull>, CRH, 'A', 8>;
    pub type B0_OLED_DC = Pin<Output<PushPull>, CRL, 'B', 0>;
    pub type B1_OLED_RESET = Pin<Output<PushPull>, CRL, 'B', 1>;
    pub type B5_NAV_UP = Pin<Input<PullUp>, CRL, 'B', 5>;
    pub type B6_NAV_DOWN = Pin<Input<PullUp>, CRL, 'B', 6>;
    pub type B8_BTN_MUTE = Pin<Input<PullUp>, CRH, 'B', 8>;
    pub type B9_BTN_RESTORE = Pin<Input<PullUp>, CRH, 'B', 9>;
    pub type B10_I2C2_SCL = Pin<Alternate<OpenDrain>, CRH, 'B', 10>;
    pub type B11_I2C2_SDA = Pin<Alternate<OpenDrain>, CRH, 'B', 11>;
    pub type B12_OLED_CS = Pin<Output<PushPull>, CRH, 'B', 12>;
    pub type B13_SPI2_SCK = Pin<Alternate<PushPull>, CRH, 'B', 13>;
    pub type B14_SPI2_MISO = Pin<Input<Floating>, CRH, 'B', 14>;
    pub type B15_SPI2_MOSI = Pin<Alternate<PushPull>, CRH, 'B', 15>;
}

pub type I2cBus = BlockingI2c<I2C2, (pins::B10_I2C2_SCL, pins::B11_I2C2_SDA)>;

pub type OledSpi = Spi<
    SPI2,
    Spi2NoRemap,
    (pins::B13_SPI2_SCK, pins::B14_SPI2_MISO, pins::B15_SPI2_MOSI),
    u8,
>;

pub type Oled = Ssd1306<
    SPIInterface<OledSpi, pins::B0_OLED_DC, pins::B12_OLED_CS>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;
