//! Continuous waveform playback: a PWM carrier on TIM1 CH1 whose compare
//! register is refilled from the wave table by circular DMA, paced by TIM2
//! update events.
//!
//! Once armed, the whole path runs without CPU participation: TIM2 raises a
//! DMA request every sample interval, DMA1 channel 2 copies the next table
//! entry into TIM1's CCR1, and wraps around forever. The control loop only
//! ever touches TIM2's auto-reload register (to retune) and the table memory
//! (to change the shape).

use crate::hal::pins;
use sinebox::{config, tone};
use stm32f1xx_hal::device::{DMA1, RCC, TIM1, TIM2};
use stm32f1xx_hal::dma::dma1;
use stm32f1xx_hal::rcc::{Enable, Reset};
use stm32f1xx_hal::timer::Ocm;

pub struct WavePlayback {
    pace: TIM2,
    _carrier: TIM1,
    _dma_ch: dma1::C2,
    _pin: pins::A8_TIM1C1_WAVE,
}

// modified from
// https://github.com/stm32-rs/stm32f1xx-hal/blob/f9b24f4d9bac7fc3c93764bd295125800944f53b/src/timer/pwm.rs#L437-L484
impl WavePlayback {
    /// Arm the playback path. `table` must point at the start of the wave
    /// buffer and stay valid (and fixed in address) for the life of the
    /// device; DMA only ever reads from it.
    pub fn new(
        carrier: TIM1,
        pace: TIM2,
        dma_ch: dma1::C2,
        pin: pins::A8_TIM1C1_WAVE,
        table: *const u16,
        freq_hz: u32,
    ) -> Self {
        unsafe {
            //NOTE(unsafe) this reference will only be used for atomic writes with no side effects
            let rcc = &(*RCC::ptr());
            // Enable and reset the timer peripherals
            TIM1::enable(rcc);
            TIM1::reset(rcc);
            TIM2::enable(rcc);
            TIM2::reset(rcc);
        }

        // Carrier: full-speed PWM, period = one converter code range
        carrier.psc.write(|w| w.psc().bits(0));
        carrier.arr.write(|w| w.arr().bits(config::wave::OUT_MAX));
        carrier.ccmr1_output().modify(|_, w| {
            w
                // preload CCR so DMA writes land at update events
                .oc1pe()
                .set_bit()
                // set output control mode
                .oc1m()
                .bits(Ocm::PwmMode1 as _)
        });
        carrier.ccr1.write(|w| w.ccr().bits(config::wave::OUT_MID));
        // Enable the capture/compare channel
        carrier.ccer.modify(|_, w| w.cc1e().set_bit());
        // TIM1 is an advanced timer: outputs are gated on MOE
        carrier.bdtr.modify(|_, w| w.moe().set_bit());
        carrier.cr1.modify(|_, w| w.arpe().set_bit());
        // load PSC/ARR, then run
        carrier.egr.write(|w| w.ug().set_bit());
        carrier.cr1.modify(|_, w| w.cen().set_bit());

        // DMA1 channel 2 is wired to TIM2 update requests. `dma_ch` proves
        // exclusive ownership of the channel (and `split` enabled the DMA
        // clock); the channel registers are programmed directly since the
        // HAL's transfer API cannot express a peripheral-writing circle.
        let ccr1_addr = &carrier.ccr1 as *const _ as u32;
        unsafe {
            //NOTE(unsafe) exclusive access to channel 2 via `dma_ch`
            let dma = &(*DMA1::ptr());
            dma.ch2.par.write(|w| w.pa().bits(ccr1_addr));
            dma.ch2.mar.write(|w| w.ma().bits(table as u32));
            dma.ch2
                .ndtr
                .write(|w| w.ndt().bits(config::wave::SAMPLES_PER_PERIOD as u16));
            dma.ch2.cr.modify(|_, w| {
                w.pl()
                    .medium()
                    .msize()
                    .bits16()
                    .psize()
                    .bits16()
                    .minc()
                    .set_bit()
                    // wrap back to the table start forever
                    .circ()
                    .set_bit()
                    // memory -> peripheral
                    .dir()
                    .set_bit()
            });
            dma.ch2.cr.modify(|_, w| w.en().set_bit());
        }

        // Pace timer: one update event (= one DMA request) per sample
        let psc = config::tone::PACE_PRESCALER - 1;
        pace.psc.write(|w| w.psc().bits(psc as u16));
        let mut playback = Self {
            pace,
            _carrier: carrier,
            _dma_ch: dma_ch,
            _pin: pin,
        };
        playback.set_frequency(freq_hz);
        playback.pace.dier.modify(|_, w| w.ude().set_bit());
        playback.pace.cr1.modify(|_, w| w.arpe().set_bit());
        // load PSC/ARR before the first tick
        playback.pace.egr.write(|w| w.ug().set_bit());
        playback.pace.cr1.modify(|_, w| w.cen().set_bit());
        playback
    }

    /// Retune live. ARR is preloaded, so the new interval takes effect at the
    /// next update event without disturbing the running transfer; this is the
    /// only place frequency is realized in hardware terms.
    pub fn set_frequency(&mut self, freq_hz: u32) {
        let ticks = tone::pace_interval_ticks(freq_hz);
        self.pace
            .arr
            .write(|w| w.arr().bits(u16::try_from(ticks - 1).unwrap()));
    }
}
