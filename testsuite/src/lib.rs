#![no_std]

use defmt_rtt as _; // global logger
use panic_probe as _; // panicking behavior
