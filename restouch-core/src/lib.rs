//! Board-agnostic core logic for the split-frame panel firmware
//!
//! This crate contains all logic that does not touch hardware:
//!
//! - Rectangle geometry and the two-segment splitter
//! - RGB565 color values as wired on the panel
//! - Touch sample model and linear calibration
//! - Board configuration types
//! - Polled edge detection for input lines
//! - Demo scenes (keyboard icon, split squares)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod touch;

pub use color::Rgb565;
pub use geometry::{split, GeometryError, Rect, Segment, SegmentLayout, SegmentRect};
pub use touch::{CalibrationParams, TouchPoint, TouchSample};
