//! Hardware driver implementations
//!
//! This crate drives the Pico-ResTouch-LCD-3.5 through the capability
//! traits in `restouch-hal`:
//!
//! - Shared SPI bus arbitration between display and touch controller
//! - Half-height segment buffer
//! - Panel transport (power-on sequence, scan-window select, pixel stream)
//! - Resistive touch sampler with averaging and calibration
//! - Frame driver that composites one frame in two segment passes

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod bus;
pub mod frame;
pub mod panel;
pub mod touch;

#[cfg(test)]
mod mock;

pub use buffer::{BufferError, SegmentBuffer};
pub use bus::{BusError, SharedBus, TouchSession};
pub use frame::{FrameDriver, FrameError, FrameStats};
pub use panel::{PanelError, PanelTransport};
pub use touch::{TouchError, TouchSampler};
