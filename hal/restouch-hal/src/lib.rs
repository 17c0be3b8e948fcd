//! Restouch Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the panel and touch drivers
//! call through. Chip-specific crates (currently only RP2040) implement them,
//! and host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  restouch-firmware                      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  restouch-drivers (bus, panel, touch)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  restouch-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ restouch-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (chip selects, DC, IRQ)
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`spi::ClockedBus`] - SPI bus whose clock can be renegotiated at runtime

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use spi::{ClockedBus, SpiBus, SpiConfig};
