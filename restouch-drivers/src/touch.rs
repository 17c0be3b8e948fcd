//! Resistive touch sampler
//!
//! Talks to the XPT2046-compatible controller on the shared bus. Presence is
//! signalled by the active-low pen interrupt line; only when it is asserted
//! is the bus switched to the touch clock. Each acquisition round reads the
//! Y axis, waits for the ADC to settle, then reads the X axis. Rounds are
//! averaged and the result mapped to display pixels.

use embedded_hal::delay::DelayNs;
use restouch_core::config::TouchConfig;
use restouch_core::{TouchPoint, TouchSample};
use restouch_hal::{ClockedBus, InputPin, OutputPin};

use crate::bus::{BusError, SharedBus};

/// Controller commands (differential, 12-bit, power-down between reads)
pub mod cmd {
    pub const READ_Y: u8 = 0xD0;
    pub const READ_X: u8 = 0x90;
}

/// The response is left aligned in 16 bits, 3 padding bits at the bottom
const SAMPLE_SHIFT: u32 = 3;

/// Extract the ADC reading from a 2-byte response
pub fn decode(response: [u8; 2]) -> u16 {
    u16::from_be_bytes(response) >> SAMPLE_SHIFT
}

/// Touch sampling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// Bus reconfiguration or transfer failed
    Bus(BusError<E>),
}

impl<E> From<BusError<E>> for TouchError<E> {
    fn from(e: BusError<E>) -> Self {
        TouchError::Bus(e)
    }
}

/// Touch controller sampler
pub struct TouchSampler<IRQ> {
    irq: IRQ,
    config: TouchConfig,
}

impl<IRQ: InputPin> TouchSampler<IRQ> {
    pub fn new(irq: IRQ, config: TouchConfig) -> Self {
        Self { irq, config }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Pen interrupt asserted (line pulled low)
    pub fn is_touched(&self) -> bool {
        self.irq.is_low()
    }

    /// Averaged raw reading, or `None` when the panel is not touched
    ///
    /// The bus is left untouched when there is no touch. Otherwise it is
    /// back at its previous clock with the touch chip select released when
    /// this returns, whether or not an error occurred.
    pub fn poll_raw<SPI, DCS, TCS, D>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        delay: &mut D,
    ) -> Result<Option<TouchSample>, TouchError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
        D: DelayNs,
    {
        if !self.is_touched() {
            return Ok(None);
        }

        let rounds = self.config.samples.max(1) as u32;
        let mut sum_x: u32 = 0;
        let mut sum_y: u32 = 0;

        let mut session = bus.touch_session(self.config.touch_hz)?;
        for _ in 0..rounds {
            sum_y += decode(session.transfer(cmd::READ_Y)?) as u32;
            delay.delay_us(self.config.settle_us);
            sum_x += decode(session.transfer(cmd::READ_X)?) as u32;
        }
        session.finish()?;

        Ok(Some(TouchSample::new(
            (sum_x / rounds) as u16,
            (sum_y / rounds) as u16,
        )))
    }

    /// Calibrated touch position, or `None` when the panel is not touched
    pub fn poll<SPI, DCS, TCS, D>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        delay: &mut D,
    ) -> Result<Option<TouchPoint>, TouchError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
        D: DelayNs,
    {
        let sample = self.poll_raw(bus, delay)?;
        Ok(sample.map(|s| self.config.calibration.apply(s)))
    }
}
