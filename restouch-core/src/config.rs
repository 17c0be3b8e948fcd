//! Board configuration types
//!
//! Configuration is fixed at build time: the firmware's build script
//! validates `board.toml` and emits a `BoardConfig` constant. Nothing here
//! is mutated after startup.

use crate::color::Rgb565;
use crate::geometry::{SegmentLayout, MAX_SEGMENT_HEIGHT};
use crate::scene::DemoScene;
use crate::touch::CalibrationParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default display clock (60 MHz)
pub const DEFAULT_DISPLAY_HZ: u32 = 60_000_000;

/// Default touch controller clock (5 MHz)
pub const DEFAULT_TOUCH_HZ: u32 = 5_000_000;

/// Default acquisition rounds per touch poll
pub const DEFAULT_TOUCH_SAMPLES: u8 = 3;

/// Default tick period
pub const DEFAULT_TICK_MS: u32 = 100;

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PanelConfig {
    /// Width and rows per segment
    pub layout: SegmentLayout,
    /// SPI clock while talking to the display controller
    pub display_hz: u32,
    /// Color each segment is cleared to before compositing
    pub background: Rgb565,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            layout: SegmentLayout::PICO_RESTOUCH_35,
            display_hz: DEFAULT_DISPLAY_HZ,
            background: Rgb565::WHITE,
        }
    }
}

/// Touch controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TouchConfig {
    /// Raw-to-display calibration
    pub calibration: CalibrationParams,
    /// SPI clock while talking to the touch controller
    pub touch_hz: u32,
    /// Acquisition rounds averaged per poll
    pub samples: u8,
    /// Settle time between the two axis reads of a round (microseconds)
    pub settle_us: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationParams::PICO_RESTOUCH_35,
            touch_hz: DEFAULT_TOUCH_HZ,
            samples: DEFAULT_TOUCH_SAMPLES,
            settle_us: 10,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BoardConfig {
    pub panel: PanelConfig,
    pub touch: TouchConfig,
    /// Fixed tick period of the main loop
    pub tick_ms: u32,
    /// Backlight duty cycle (0-100%)
    pub backlight_percent: u8,
    /// Scene rendered every tick
    pub demo: DemoScene,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            touch: TouchConfig::default(),
            tick_ms: DEFAULT_TICK_MS,
            backlight_percent: 20,
            demo: DemoScene::Keyboard,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Panel width or segment height is zero
    EmptyPanel,
    /// Segment rows do not fit the controller's 16-bit row addresses
    PanelTooTall,
    /// Calibration span or display dimensions are zero
    InvalidCalibration,
    /// Calibrated display area does not match the panel
    CalibrationMismatch,
    /// Zero acquisition rounds
    NoSamples,
    /// A clock rate is zero, or the touch clock exceeds the display clock
    InvalidClock,
    /// Tick period is zero
    InvalidTick,
    /// Backlight duty above 100%
    InvalidBacklight,
}

impl BoardConfig {
    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = self.panel.layout;
        if layout.width == 0 || layout.segment_height == 0 {
            return Err(ConfigError::EmptyPanel);
        }
        if layout.segment_height > MAX_SEGMENT_HEIGHT {
            return Err(ConfigError::PanelTooTall);
        }

        let cal = self.touch.calibration;
        if !cal.is_valid() {
            return Err(ConfigError::InvalidCalibration);
        }
        if cal.display_width != layout.width || cal.display_height as u32 != layout.panel_height() {
            return Err(ConfigError::CalibrationMismatch);
        }

        if self.touch.samples == 0 {
            return Err(ConfigError::NoSamples);
        }

        if self.panel.display_hz == 0
            || self.touch.touch_hz == 0
            || self.touch.touch_hz > self.panel.display_hz
        {
            return Err(ConfigError::InvalidClock);
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTick);
        }

        if self.backlight_percent > 100 {
            return Err(ConfigError::InvalidBacklight);
        }

        Ok(())
    }

    /// Backlight duty as a 16-bit compare value
    pub fn backlight_duty_u16(&self) -> u16 {
        if self.backlight_percent >= 100 {
            u16::MAX
        } else {
            655 * self.backlight_percent as u16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.panel.layout.panel_height(), 320);
        assert_eq!(config.touch.samples, 3);
    }

    #[test]
    fn test_touch_clock_above_display_clock() {
        let mut config = BoardConfig::default();
        config.touch.touch_hz = 80_000_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidClock));
    }

    #[test]
    fn test_zero_samples() {
        let mut config = BoardConfig::default();
        config.touch.samples = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoSamples));
    }

    #[test]
    fn test_empty_panel() {
        let mut config = BoardConfig::default();
        config.panel.layout.segment_height = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyPanel));
    }

    #[test]
    fn test_segment_rows_must_be_addressable() {
        let mut config = BoardConfig::default();
        config.panel.layout.segment_height = MAX_SEGMENT_HEIGHT + 1;
        config.touch.calibration.display_height = u16::MAX;
        assert_eq!(config.validate(), Err(ConfigError::PanelTooTall));
    }

    #[test]
    fn test_calibration_must_match_panel() {
        let mut config = BoardConfig::default();
        config.touch.calibration.display_height = 160;
        assert_eq!(config.validate(), Err(ConfigError::CalibrationMismatch));

        let mut config = BoardConfig::default();
        config.touch.calibration.raw_span = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCalibration));
    }

    #[test]
    fn test_backlight() {
        let mut config = BoardConfig::default();
        assert_eq!(config.backlight_duty_u16(), 655 * 20);

        config.backlight_percent = 100;
        assert_eq!(config.backlight_duty_u16(), u16::MAX);

        config.backlight_percent = 101;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBacklight));
    }

    #[test]
    fn test_zero_tick() {
        let config = BoardConfig {
            tick_ms: 0,
            ..BoardConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTick));
    }
}
