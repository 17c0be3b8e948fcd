//! Blocking SPI bus with clock renegotiation
//!
//! Wraps an embassy-rp blocking SPI instance. The clock is tracked here
//! because the peripheral does not report it back.

use embassy_rp::spi::{self, Blocking, Instance, Spi};
use restouch_hal::spi::{Phase, Polarity};
use restouch_hal::{ClockedBus, SpiBus, SpiConfig};

/// Convert the HAL configuration into the embassy-rp one
pub fn embassy_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}

/// SPI bus shared by the display and touch controllers
pub struct RpSpiBus<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
    frequency: u32,
}

impl<'d, T: Instance> RpSpiBus<'d, T> {
    /// Take a configured blocking SPI instance
    pub fn new(mut spi: Spi<'d, T, Blocking>, config: SpiConfig) -> Self {
        spi.set_config(&embassy_config(&config));
        Self {
            spi,
            frequency: config.frequency,
        }
    }
}

impl<T: Instance> SpiBus for RpSpiBus<'_, T> {
    type Error = spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.blocking_write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.blocking_read(buf)
    }
}

impl<T: Instance> ClockedBus for RpSpiBus<'_, T> {
    fn frequency(&self) -> u32 {
        self.frequency
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        if hz != self.frequency {
            self.spi.set_frequency(hz);
            self.frequency = hz;
        }
        Ok(())
    }
}
