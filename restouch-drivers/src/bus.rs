//! Shared SPI bus arbitration
//!
//! The display controller and the touch controller share SCK/MOSI/MISO and
//! differ only in their chip-select line and clock rate. [`SharedBus`] owns
//! the bus and both chip selects; every user borrows it mutably, so at most
//! one role can drive it at any instant.
//!
//! Touch access goes through a [`TouchSession`] guard which lowers the clock,
//! asserts the touch chip select, and on every exit path (including early
//! returns on error) de-asserts it and restores the previous clock.

use restouch_hal::{ClockedBus, OutputPin};

/// Errors from the shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// Underlying SPI transfer or reconfiguration failed
    Spi(E),
    /// The other chip select was still asserted
    Contention,
}

/// SPI bus plus the chip selects of both controllers
pub struct SharedBus<SPI, DCS, TCS> {
    spi: SPI,
    display_cs: DCS,
    touch_cs: TCS,
}

impl<SPI, DCS, TCS> SharedBus<SPI, DCS, TCS>
where
    SPI: ClockedBus,
    DCS: OutputPin,
    TCS: OutputPin,
{
    /// Take ownership of the bus; both chip selects start de-asserted
    pub fn new(spi: SPI, mut display_cs: DCS, mut touch_cs: TCS) -> Self {
        display_cs.set_high();
        touch_cs.set_high();
        Self {
            spi,
            display_cs,
            touch_cs,
        }
    }

    /// Current bus clock in Hz
    pub fn frequency(&self) -> u32 {
        self.spi.frequency()
    }

    /// True when neither controller is selected
    pub fn is_idle(&self) -> bool {
        self.display_cs.is_set_high() && self.touch_cs.is_set_high()
    }

    /// Write bytes to the display controller
    ///
    /// The display chip select is asserted only for the duration of this
    /// write. The caller sets the data/command line beforehand.
    pub fn display_write(&mut self, data: &[u8]) -> Result<(), BusError<SPI::Error>> {
        if self.touch_cs.is_set_low() {
            return Err(BusError::Contention);
        }

        self.display_cs.set_low();
        let result = self.spi.write(data);
        self.display_cs.set_high();

        result.map_err(BusError::Spi)
    }

    /// Switch the bus to the touch controller
    ///
    /// Fails without asserting anything if the bus is busy or the clock
    /// cannot be changed; in the latter case the previous clock is put back
    /// on a best-effort basis.
    pub fn touch_session(
        &mut self,
        hz: u32,
    ) -> Result<TouchSession<'_, SPI, DCS, TCS>, BusError<SPI::Error>> {
        if !self.is_idle() {
            return Err(BusError::Contention);
        }

        let prior_hz = self.spi.frequency();
        if let Err(e) = self.spi.set_frequency(hz) {
            let _ = self.spi.set_frequency(prior_hz);
            return Err(BusError::Spi(e));
        }

        self.touch_cs.set_low();

        Ok(TouchSession {
            bus: self,
            prior_hz,
            open: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }
}

/// Exclusive touch-controller access at the touch clock rate
///
/// Dropping the session ends it; call [`TouchSession::finish`] to see
/// whether restoring the display clock succeeded.
pub struct TouchSession<'a, SPI, DCS, TCS>
where
    SPI: ClockedBus,
    DCS: OutputPin,
    TCS: OutputPin,
{
    bus: &'a mut SharedBus<SPI, DCS, TCS>,
    prior_hz: u32,
    open: bool,
}

impl<'a, SPI, DCS, TCS> TouchSession<'a, SPI, DCS, TCS>
where
    SPI: ClockedBus,
    DCS: OutputPin,
    TCS: OutputPin,
{
    /// Send a one-byte command and read the two-byte response
    pub fn transfer(&mut self, command: u8) -> Result<[u8; 2], BusError<SPI::Error>> {
        let mut response = [0u8; 2];
        self.bus.spi.write(&[command]).map_err(BusError::Spi)?;
        self.bus.spi.read(&mut response).map_err(BusError::Spi)?;
        Ok(response)
    }

    /// Clock rate the bus returns to when the session ends
    pub fn prior_frequency(&self) -> u32 {
        self.prior_hz
    }

    /// End the session, reporting a failed clock restore
    pub fn finish(mut self) -> Result<(), BusError<SPI::Error>> {
        self.close()
    }

    fn close(&mut self) -> Result<(), BusError<SPI::Error>> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.bus.touch_cs.set_high();
        self.bus
            .spi
            .set_frequency(self.prior_hz)
            .map_err(BusError::Spi)
    }
}

impl<'a, SPI, DCS, TCS> Drop for TouchSession<'a, SPI, DCS, TCS>
where
    SPI: ClockedBus,
    DCS: OutputPin,
    TCS: OutputPin,
{
    fn drop(&mut self) {
        let _ = self.close();
    }
}
