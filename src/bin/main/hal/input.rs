//! Edge detection over the raw front-panel inputs.
//!
//! All switches idle high on pull-ups; an event is the high-to-low edge
//! between two consecutive polls, so holding a control does not auto-repeat.

use crate::hal::pins;
use crate::panic::OptionalExt;
use embedded_hal::digital::v2::InputPin;
use sinebox::menu::{DirInput, Rotation};

/// Everything the control loop learned from one poll.
#[derive(Clone, Copy, Default)]
pub struct ControlEvents {
    pub nav: DirInput,
    pub rotation: Option<Rotation>,
    pub mute: bool,
    pub restore: bool,
}

struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    const fn new() -> Self {
        Self { last: false }
    }

    fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.last;
        self.last = pressed;
        edge
    }
}

/// Quadrature-ish decode: on the falling edge of the clock line, the data
/// line's level gives the direction.
struct RotaryDecoder {
    last_clk: bool,
}

impl RotaryDecoder {
    const fn new() -> Self {
        Self { last_clk: true }
    }

    fn update(&mut self, clk: bool, dir: bool) -> Option<Rotation> {
        let edge = !clk && self.last_clk;
        self.last_clk = clk;
        if !edge {
            None
        } else if dir {
            Some(Rotation::CounterClockwise)
        } else {
            Some(Rotation::Clockwise)
        }
    }
}

pub struct Controls {
    rotary_clk: pins::A0_ROTARY_CLK,
    rotary_dir: pins::A1_ROTARY_DIR,
    rotary: RotaryDecoder,
    nav_up: pins::B5_NAV_UP,
    nav_up_edge: EdgeDetector,
    nav_down: pins::B6_NAV_DOWN,
    nav_down_edge: EdgeDetector,
    mute: pins::B8_BTN_MUTE,
    mute_edge: EdgeDetector,
    restore: pins::B9_BTN_RESTORE,
    restore_edge: EdgeDetector,
}

impl Controls {
    pub fn new(
        rotary_clk: pins::A0_ROTARY_CLK,
        rotary_dir: pins::A1_ROTARY_DIR,
        nav_up: pins::B5_NAV_UP,
        nav_down: pins::B6_NAV_DOWN,
        mute: pins::B8_BTN_MUTE,
        restore: pins::B9_BTN_RESTORE,
    ) -> Self {
        Self {
            rotary_clk,
            rotary_dir,
            rotary: RotaryDecoder::new(),
            nav_up,
            nav_up_edge: EdgeDetector::new(),
            nav_down,
            nav_down_edge: EdgeDetector::new(),
            mute,
            mute_edge: EdgeDetector::new(),
            restore,
            restore_edge: EdgeDetector::new(),
        }
    }

    /// Sample every control exactly once.
    pub fn poll(&mut self) -> ControlEvents {
        let clk = InputPin::is_high(&self.rotary_clk).unwrap_infallible();
        let dir = InputPin::is_high(&self.rotary_dir).unwrap_infallible();
        ControlEvents {
            nav: DirInput {
                up: self
                    .nav_up_edge
                    .update(InputPin::is_low(&self.nav_up).unwrap_infallible()),
                down: self
                    .nav_down_edge
                    .update(InputPin::is_low(&self.nav_down).unwrap_infallible()),
            },
            rotation: self.rotary.update(clk, dir),
            mute: self
                .mute_edge
                .update(InputPin::is_low(&self.mute).unwrap_infallible()),
            restore: self
                .restore_edge
                .update(InputPin::is_low(&self.restore).unwrap_infallible()),
        }
    }
}
