//! Touch sample model and calibration
//!
//! The resistive touch controller reports 12-bit ADC readings per axis.
//! Calibration is a per-axis linear map with one shared `offset`/`raw_span`
//! pair, measured once for a physical unit and compiled in as configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Averaged raw ADC reading for both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub raw_x: u16,
    pub raw_y: u16,
}

impl TouchSample {
    pub const fn new(raw_x: u16, raw_y: u16) -> Self {
        Self { raw_x, raw_y }
    }
}

/// Touch position in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Check whether the point lies inside a half-open box `[x0, x1) x [y0, y1)`
    pub fn hits(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> bool {
        (x0..x1).contains(&self.x) && (y0..y1).contains(&self.y)
    }
}

/// Raw-to-display calibration constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CalibrationParams {
    /// Raw reading at the panel's origin edge
    pub offset: u16,
    /// Raw reading distance between the origin edge and the far edge
    pub raw_span: u16,
    /// Display width in pixels (X axis)
    pub display_width: u16,
    /// Display height in pixels (Y axis)
    pub display_height: u16,
}

impl CalibrationParams {
    /// Values measured on the Pico-ResTouch-LCD-3.5 in landscape
    pub const PICO_RESTOUCH_35: Self = Self {
        offset: 430,
        raw_span: 3270,
        display_width: 480,
        display_height: 320,
    };

    /// Map an averaged sample to display coordinates
    ///
    /// Both axes are clamped to `[0, dimension]`.
    pub fn apply(&self, sample: TouchSample) -> TouchPoint {
        TouchPoint {
            x: self.map_axis(sample.raw_x, self.display_width),
            y: self.map_axis(sample.raw_y, self.display_height),
        }
    }

    /// Linear map of one axis: `(raw - offset) * dimension / raw_span`
    pub fn map_axis(&self, raw: u16, dimension: u16) -> u16 {
        let delta = raw as i32 - self.offset as i32;
        let scaled = (delta * dimension as i32)
            .checked_div(self.raw_span as i32)
            .unwrap_or(0);
        scaled.clamp(0, dimension as i32) as u16
    }

    /// Reject constants that would make the map meaningless
    pub fn is_valid(&self) -> bool {
        self.raw_span > 0 && self.display_width > 0 && self.display_height > 0
    }
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self::PICO_RESTOUCH_35
    }
}
