//! RP2040-specific HAL for the split-frame panel firmware
//!
//! This crate provides RP2040 implementations of the `restouch-hal`
//! traits over embassy-rp peripherals, plus the board's backlight:
//!
//! - GPIO output/input wrappers (chip selects, DC, reset, touch IRQ)
//! - Blocking SPI bus with runtime clock renegotiation
//! - PWM backlight

#![no_std]

pub mod backlight;
pub mod gpio;
pub mod spi;

pub use backlight::Backlight;
pub use gpio::{RpInput, RpOutput};
pub use spi::RpSpiBus;
