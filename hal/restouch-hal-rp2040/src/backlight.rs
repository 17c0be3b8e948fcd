//! PWM backlight
//!
//! The backlight enable line is driven by PWM at 1 kHz. Brightness is set
//! as a 16-bit duty value and scaled to the slice's counter range.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::U12F4;

/// System clock the PWM slice runs from
const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Integer clock divider
const DIVIDER: u32 = 4;

/// Backlight PWM frequency
pub const BACKLIGHT_FREQUENCY_HZ: u32 = 1_000;

/// Counter wrap value for [`BACKLIGHT_FREQUENCY_HZ`]
const TOP: u16 = (SYS_CLOCK_HZ / DIVIDER / BACKLIGHT_FREQUENCY_HZ - 1) as u16;

/// Compare value for a 16-bit duty on a counter wrapping at `top`
pub fn compare_for(duty_u16: u16, top: u16) -> u16 {
    ((duty_u16 as u32 * (top as u32 + 1)) / u16::MAX as u32) as u16
}

/// Backlight on PWM channel B
pub struct Backlight<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> Backlight<'d> {
    /// Start the PWM with the backlight off
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = U12F4::from_num(DIVIDER);
        config.top = TOP;
        config.compare_b = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }

    /// Set brightness as a 16-bit duty value (`u16::MAX` is full on)
    pub fn set_duty_u16(&mut self, duty: u16) {
        self.config.compare_b = compare_for(duty, self.config.top);
        self.pwm.set_config(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_gives_one_kilohertz() {
        assert_eq!(TOP, 31_249);
    }

    #[test]
    fn test_compare_scaling() {
        assert_eq!(compare_for(0, TOP), 0);
        assert_eq!(compare_for(u16::MAX, TOP), TOP + 1);
        assert_eq!(compare_for(655 * 50, TOP), 15_616);
    }
}
