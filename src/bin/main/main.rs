#![no_main]
#![no_std]
#![allow(clippy::type_complexity)]

use defmt_rtt as _; // global logger
use panic_probe as _; // panicking behavior

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

mod hal;
mod panic;

use sinebox::config;

fn dump_config() {
    defmt::info!(
        "\n\
        Clocks:\n\
        - HSE_FREQ: {} Hz\n\
        - SYSCLK:   {} Hz\n\
        - PCLK1:    {} Hz\n\
        Tone:\n\
        - FREQ: {}..{} Hz, step {} Hz, initial {} Hz\n\
        - PACE_CLK: {} Hz\n\
        - SAMPLES_PER_PERIOD: {}\n\
        Volume:\n\
        - LEVEL: {}..{}, initial {}\n\
        Light:\n\
        - DARK_THRESHOLD: {} lux\n\
        Store:\n\
        - OFFSET: {=u32:#x}\n\
        ",
        config::clk::HSE_FREQ.to_Hz(),
        config::clk::SYSCLK.to_Hz(),
        config::clk::PCLK1.to_Hz(),
        config::tone::FREQ_HZ_MIN,
        config::tone::FREQ_HZ_MAX,
        config::tone::FREQ_HZ_STEP,
        config::tone::FREQ_HZ_INITIAL,
        config::tone::PACE_CLK_HZ,
        config::wave::SAMPLES_PER_PERIOD,
        config::volume::LEVEL_MIN,
        config::volume::LEVEL_MAX,
        config::volume::LEVEL_INITIAL,
        config::light::DARK_THRESHOLD_LUX,
        config::store::OFFSET,
    );
}

#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [USART1])]
mod app {
    use crate::hal;
    use crate::panic::OptionalExt;
    use cortex_m::singleton;
    use dwt_systick_monotonic::DwtSystick;
    use sinebox::ambient::AmbientMonitor;
    use sinebox::leds::LedAnimator;
    use sinebox::menu::{Entry, MenuState, Rotation};
    use sinebox::screen::{self, Redraw, View};
    use sinebox::settings::{self, LoadError, Settings};
    use sinebox::tone::ToneState;
    use sinebox::volume::{VolumeActuator, VolumeState};
    use sinebox::{config, wave};
    use ssd1306::prelude::*;
    use ssd1306::Ssd1306;
    use stm32f1xx_hal::gpio::PinState;
    use stm32f1xx_hal::i2c::{BlockingI2c, Mode as I2cMode};
    use stm32f1xx_hal::prelude::*;
    use stm32f1xx_hal::spi::{Mode as SpiMode, Phase, Polarity, Spi};

    #[monotonic(binds = SysTick, default = true)]
    type DwtMono = DwtSystick<{ config::clk::SYSCLK_HZ }>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        controls: hal::input::Controls,
        playback: hal::wavegen::WavePlayback,
        wave_table: &'static mut wave::Buffer,
        display: hal::Oled,
        i2c: hal::I2cBus,
        led_driver: hal::pca9532::Pca9532,
        volume_actuator: VolumeActuator<hal::pins::A2_AMP_SELECT, hal::pins::A3_AMP_CLOCK>,
        delay: hal::delay::CycleDelay,
        store: hal::store::FlashStore,
        menu: MenuState,
        tone: ToneState,
        volume: VolumeState,
        ambient: AmbientMonitor,
        animator: LedAnimator,
        _amp_shutdown: hal::pins::A4_AMP_SHUTDOWN,
        _oled_reset: hal::pins::B1_OLED_RESET,
    }

    #[init]
    fn init(mut cx: init::Context) -> (Shared, Local, init::Monotonics) {
        crate::dump_config();

        defmt::info!("Configuring clocks...");

        let mut flash = cx.device.FLASH.constrain();
        let rcc = cx.device.RCC.constrain();

        let clocks = rcc
            .cfgr
            .use_hse(config::clk::HSE_FREQ)
            .sysclk(config::clk::SYSCLK)
            .pclk1(config::clk::PCLK1)
            .pclk2(config::clk::PCLK2)
            .freeze(&mut flash.acr);

        assert!(config::clk::SYSCLK == clocks.sysclk());
        assert!(config::clk::PCLK1 == clocks.pclk1());
        assert!(config::clk::PCLK2 == clocks.pclk2());

        defmt::info!("Configuring monotonic timer...");

        let mono = DwtSystick::new(
            &mut cx.core.DCB,
            cx.core.DWT,
            cx.core.SYST,
            clocks.sysclk().to_Hz(),
        );

        defmt::info!("Loading persisted settings...");

        let mut store = hal::store::FlashStore::new(flash);
        let stored = match settings::load(&mut store) {
            Ok(stored) => {
                defmt::info!("loaded settings: {}", stored);
                stored
            }
            Err(LoadError::Invalid) => {
                defmt::warn!("stored settings invalid, using defaults");
                Settings::DEFAULT
            }
            Err(LoadError::Storage(_)) => {
                defmt::warn!("settings read failed, using defaults");
                Settings::DEFAULT
            }
        };
        let tone = ToneState::new(stored.freq_hz);
        let volume = VolumeState::new(stored.volume);

        defmt::info!("Configuring amplifier control lines...");

        let mut gpioa = cx.device.GPIOA.split();
        let mut gpiob = cx.device.GPIOB.split();

        // shutdown is held low: amplifier enabled for the life of the device
        let _amp_shutdown = gpioa
            .pa4
            .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low);
        let amp_select = gpioa
            .pa2
            .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low);
        let amp_clock = gpioa
            .pa3
            .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low);

        let mut delay = hal::delay::CycleDelay::new(config::clk::SYSCLK_HZ);
        let mut volume_actuator = VolumeActuator::new(amp_select, amp_clock).unwrap_infallible();

        // no read-back: floor the device, then climb to the stored level
        volume_actuator
            .reset_to(volume.level(), &mut delay)
            .unwrap_infallible();

        defmt::info!("Arming waveform playback...");

        let wave_table =
            singleton!(: wave::Buffer = [0; config::wave::SAMPLES_PER_PERIOD]).unwrap_infallible();
        wave::fill_with_sine(wave_table);

        let dma1 = cx.device.DMA1.split();
        let wave_pin = gpioa.pa8.into_alternate_push_pull(&mut gpioa.crh);
        let playback = hal::wavegen::WavePlayback::new(
            cx.device.TIM1,
            cx.device.TIM2,
            dma1.2,
            wave_pin,
            wave_table.as_ptr(),
            tone.freq_hz(),
        );

        defmt::info!("Configuring display...");

        let sck = gpiob.pb13.into_alternate_push_pull(&mut gpiob.crh);
        let miso = gpiob.pb14.into_floating_input(&mut gpiob.crh);
        let mosi = gpiob.pb15.into_alternate_push_pull(&mut gpiob.crh);
        let spi = Spi::spi2(
            cx.device.SPI2,
            (sck, miso, mosi),
            SpiMode {
                polarity: Polarity::IdleLow,
                phase: Phase::CaptureOnFirstTransition,
            },
            4.MHz(),
            clocks,
        );
        let dc = gpiob.pb0.into_push_pull_output(&mut gpiob.crl);
        let cs = gpiob
            .pb12
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::High);
        let mut oled_reset = gpiob.pb1.into_push_pull_output(&mut gpiob.crl);

        let interface = display_interface_spi::SPIInterface::new(spi, dc, cs);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.reset(&mut oled_reset, &mut delay).is_err() {
            defmt::warn!("display reset failed");
        }
        if display.init().is_err() {
            defmt::panic!("display init failed");
        }

        defmt::info!("Configuring I2C devices...");

        let scl = gpiob.pb10.into_alternate_open_drain(&mut gpiob.crh);
        let sda = gpiob.pb11.into_alternate_open_drain(&mut gpiob.crh);
        let mut i2c = BlockingI2c::i2c2(
            cx.device.I2C2,
            (scl, sda),
            I2cMode::Standard {
                frequency: 100.kHz(),
            },
            clocks,
            1000,
            10,
            1000,
            1000,
        );

        if hal::light::init(&mut i2c).is_err() {
            defmt::warn!("light sensor init failed");
        }
        let ambient = match hal::light::read_lux(&mut i2c) {
            Ok(lux) => AmbientMonitor::new(lux),
            Err(_) => {
                defmt::warn!("light sensor read failed, assuming bright");
                AmbientMonitor::new(config::light::DARK_THRESHOLD_LUX)
            }
        };

        let mut led_driver = hal::pca9532::Pca9532::new();
        if led_driver.set(&mut i2c, 0, 0xFFFF).is_err() {
            defmt::warn!("led driver init failed");
        }

        defmt::info!("Reading controls and drawing initial screen...");

        let controls = hal::input::Controls::new(
            gpioa.pa0.into_pull_up_input(&mut gpioa.crl),
            gpioa.pa1.into_pull_up_input(&mut gpioa.crl),
            gpiob.pb5.into_pull_up_input(&mut gpiob.crl),
            gpiob.pb6.into_pull_up_input(&mut gpiob.crl),
            gpiob.pb8.into_pull_up_input(&mut gpiob.crh),
            gpiob.pb9.into_pull_up_input(&mut gpiob.crh),
        );
        let menu = MenuState::new();

        let view = View {
            freq_hz: tone.freq_hz(),
            volume: volume.level(),
            active: menu.active(),
            dark: ambient.is_dark(),
        };
        screen::refresh(&mut display, &view, Redraw::ALL, true).unwrap_infallible();
        if display.flush().is_err() {
            defmt::warn!("display flush failed");
        }

        defmt::info!("Finished init.");

        tick::spawn().ok();

        (
            Shared {},
            Local {
                controls,
                playback,
                wave_table,
                display,
                i2c,
                led_driver,
                volume_actuator,
                delay,
                store,
                menu,
                tone,
                volume,
                ambient,
                animator: LedAnimator::new(),
                _amp_shutdown,
                _oled_reset: oled_reset,
            },
            init::Monotonics(mono),
        )
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            // Note that using `wfi` here breaks debugging,
            // so if desired we should only do that in release mode.
            continue;
        }
    }

    /// One pass of the control loop: input -> compute -> act -> persist ->
    /// render, then reschedule after the fixed tick period.
    #[task(local = [
        controls, playback, wave_table, display, i2c, led_driver,
        volume_actuator, delay, store, menu, tone, volume, ambient, animator
    ], priority = 1)]
    fn tick(cx: tick::Context) {
        let events = cx.local.controls.poll();

        let mut what = Redraw::NONE;
        let mut settings_dirty = false;

        // Navigation wins: a selection change suppresses the parameter
        // branch for this tick.
        if cx.local.menu.select(events.nav) {
            defmt::debug!("menu: {}", cx.local.menu.active());
            what |= Redraw::ALL;
        } else if let Some(rotation) = events.rotation {
            match cx.local.menu.active() {
                Entry::Frequency => {
                    let changed = match rotation {
                        Rotation::Clockwise => cx.local.tone.step_up(),
                        Rotation::CounterClockwise => cx.local.tone.step_down(),
                    };
                    cx.local.playback.set_frequency(cx.local.tone.freq_hz());
                    defmt::debug!("frequency: {} Hz", cx.local.tone.freq_hz());
                    what |= Redraw::FREQUENCY;
                    // a detent clamped at a bound leaves nothing to persist
                    settings_dirty = changed;
                }
                Entry::Volume => {
                    // the actuator is pulsed before the tracking integer moves
                    let changed = match rotation {
                        Rotation::Clockwise => {
                            cx.local
                                .volume_actuator
                                .step_up(cx.local.delay)
                                .unwrap_infallible();
                            cx.local.volume.step_up()
                        }
                        Rotation::CounterClockwise => {
                            cx.local
                                .volume_actuator
                                .step_down(cx.local.delay)
                                .unwrap_infallible();
                            cx.local.volume.step_down()
                        }
                    };
                    defmt::debug!("volume: {}", cx.local.volume.level());
                    what |= Redraw::VOLUME;
                    settings_dirty = changed;
                }
            }
        }

        // Rewriting the table never stops playback and never changes pitch.
        if events.mute {
            wave::fill_with_silence(cx.local.wave_table);
            defmt::info!("output muted");
        }
        if events.restore {
            wave::fill_with_sine(cx.local.wave_table);
            defmt::info!("output restored");
        }

        // A failed light read keeps the previous mode.
        let mode_changed = match hal::light::read_lux(cx.local.i2c) {
            Ok(lux) => cx.local.ambient.update(lux),
            Err(_) => {
                defmt::warn!("light sensor read failed");
                false
            }
        };
        if mode_changed {
            defmt::info!("dark mode: {}", cx.local.ambient.is_dark());
            what |= Redraw::ALL;
        }

        // Persist only on a user-visible change, to bound flash wear.
        if settings_dirty {
            let settings = Settings {
                freq_hz: cx.local.tone.freq_hz(),
                volume: cx.local.volume.level(),
            };
            if settings::save(cx.local.store, &settings).is_err() {
                defmt::warn!("failed to persist settings");
            }
        }

        if !what.is_empty() {
            let view = View {
                freq_hz: cx.local.tone.freq_hz(),
                volume: cx.local.volume.level(),
                active: cx.local.menu.active(),
                dark: cx.local.ambient.is_dark(),
            };
            screen::refresh(cx.local.display, &view, what, mode_changed).unwrap_infallible();
            if cx.local.display.flush().is_err() {
                defmt::warn!("display flush failed");
            }
        }

        if let Some(step) = cx.local.animator.tick(cx.local.tone.freq_hz()) {
            if cx
                .local
                .led_driver
                .set(cx.local.i2c, step.on, step.off)
                .is_err()
            {
                defmt::warn!("led driver write failed");
            }
        }

        tick::spawn_after(config::tick::PERIOD).ok();
    }
}
