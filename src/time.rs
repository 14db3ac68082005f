use crate::config;

pub type Duration = fugit::Duration<u32, 1, { config::clk::SYSCLK_HZ }>;
