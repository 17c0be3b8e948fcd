//! Panel transport for the 3.5" 480x320 IPS controller
//!
//! Translates a filled [`SegmentBuffer`] into the wire sequence that selects
//! the segment's absolute scan window and streams its pixels:
//!
//! ```text
//! CASET 0x2A  [c0_hi, c0_lo, c1_hi, c1_lo]   full column range
//! RASET 0x2B  [r0_hi, r0_lo, r1_hi, r1_lo]   absolute rows of the segment
//! RAMWR 0x2C  <W * H * 2 bytes of pixels>
//! ```
//!
//! The buffer is always segment-local; only the row window carries the
//! absolute position. Commands are sent with DC low, parameters and pixel
//! data with DC high.

use embedded_hal::delay::DelayNs;
use restouch_core::{Segment, SegmentLayout};
use restouch_hal::{ClockedBus, OutputPin};

use crate::buffer::SegmentBuffer;
use crate::bus::{BusError, SharedBus};

/// Controller commands
pub mod cmd {
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const FRAME_RATE_CONTROL: u8 = 0xB1;
    pub const DISPLAY_FUNCTION_CONTROL: u8 = 0xB6;
    pub const POWER_CONTROL_3: u8 = 0xC2;
    pub const VCOM_CONTROL: u8 = 0xC5;
    pub const POSITIVE_GAMMA: u8 = 0xE0;
    pub const NEGATIVE_GAMMA: u8 = 0xE1;
}

/// One step of the power-on sequence
struct InitStep {
    command: u8,
    params: &'static [u8],
    /// Settle time after the step
    delay_ms: u32,
}

const fn step(command: u8, params: &'static [u8]) -> InitStep {
    InitStep {
        command,
        params,
        delay_ms: 0,
    }
}

/// Vendor power-on sequence for the Pico-ResTouch-LCD-3.5
const INIT_SEQUENCE: &[InitStep] = &[
    step(cmd::INVERSION_ON, &[]),
    step(cmd::POWER_CONTROL_3, &[0x33]),
    step(cmd::VCOM_CONTROL, &[0x00, 0x1E, 0x80]),
    step(cmd::FRAME_RATE_CONTROL, &[0xB0]),
    step(cmd::MEMORY_ACCESS_CONTROL, &[0x28]),
    step(
        cmd::POSITIVE_GAMMA,
        &[
            0x00, 0x13, 0x18, 0x04, 0x0F, 0x06, 0x3A, 0x56, 0x4D, 0x03, 0x0A, 0x06, 0x30, 0x3E,
            0x0F,
        ],
    ),
    step(
        cmd::NEGATIVE_GAMMA,
        &[
            0x00, 0x13, 0x18, 0x01, 0x11, 0x06, 0x38, 0x34, 0x4D, 0x06, 0x0D, 0x0B, 0x31, 0x37,
            0x0F,
        ],
    ),
    step(cmd::PIXEL_FORMAT, &[0x55]),
    InitStep {
        command: cmd::SLEEP_OUT,
        params: &[],
        delay_ms: 120,
    },
    step(cmd::DISPLAY_ON, &[]),
    step(cmd::DISPLAY_FUNCTION_CONTROL, &[0x00, 0x62]),
    step(cmd::MEMORY_ACCESS_CONTROL, &[0x28]),
];

/// Encode an inclusive address range as the 4-byte big-endian parameter
pub fn window_bytes(first: u16, last: u16) -> [u8; 4] {
    let [f_hi, f_lo] = first.to_be_bytes();
    let [l_hi, l_lo] = last.to_be_bytes();
    [f_hi, f_lo, l_hi, l_lo]
}

/// Panel transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// Bus write failed
    Bus(BusError<E>),
    /// Buffer was built for a different layout than the panel
    LayoutMismatch,
}

impl<E> From<BusError<E>> for PanelError<E> {
    fn from(e: BusError<E>) -> Self {
        PanelError::Bus(e)
    }
}

/// Display controller connection: data/command and reset lines
pub struct PanelTransport<DC, RST> {
    dc: DC,
    rst: RST,
    layout: SegmentLayout,
}

impl<DC, RST> PanelTransport<DC, RST>
where
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a transport; the controller is not touched until [`Self::init`]
    pub fn new(mut dc: DC, mut rst: RST, layout: SegmentLayout) -> Self {
        dc.set_high();
        rst.set_high();
        Self { dc, rst, layout }
    }

    pub fn layout(&self) -> SegmentLayout {
        self.layout
    }

    /// Hardware reset followed by the vendor power-on sequence
    pub fn init<SPI, DCS, TCS, D>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        delay: &mut D,
    ) -> Result<(), PanelError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
        D: DelayNs,
    {
        self.rst.set_high();
        delay.delay_ms(5);
        self.rst.set_low();
        delay.delay_ms(10);
        self.rst.set_high();
        delay.delay_ms(5);

        for step in INIT_SEQUENCE {
            self.command(bus, step.command, step.params)?;
            if step.delay_ms > 0 {
                delay.delay_ms(step.delay_ms);
            }
        }

        Ok(())
    }

    /// Send one command byte followed by its parameters
    pub fn command<SPI, DCS, TCS>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        command: u8,
        params: &[u8],
    ) -> Result<(), PanelError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
    {
        self.dc.set_low();
        bus.display_write(&[command])?;
        if !params.is_empty() {
            self.dc.set_high();
            bus.display_write(params)?;
        }
        Ok(())
    }

    /// Point the controller's scan window at a segment and open memory write
    pub fn select_window<SPI, DCS, TCS>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        segment: Segment,
    ) -> Result<(), PanelError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
    {
        let (c0, c1) = self.layout.columns();
        let (r0, r1) = self.layout.rows(segment);

        self.command(bus, cmd::COLUMN_ADDRESS_SET, &window_bytes(c0, c1))?;
        self.command(bus, cmd::ROW_ADDRESS_SET, &window_bytes(r0, r1))?;
        self.command(bus, cmd::MEMORY_WRITE, &[])
    }

    /// Show a composed segment
    ///
    /// Selects the absolute window of `buffer.segment()` and streams the
    /// buffer verbatim. Failures are returned to the caller, never retried.
    pub fn present<SPI, DCS, TCS>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        buffer: &SegmentBuffer<'_>,
    ) -> Result<(), PanelError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
    {
        if buffer.layout() != self.layout {
            return Err(PanelError::LayoutMismatch);
        }

        self.select_window(bus, buffer.segment())?;
        self.dc.set_high();
        bus.display_write(buffer.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        display_writes, mock_bus, MockDelay, MockPin, MockSpiError, Op, PinRole, Trace,
    };
    use restouch_core::Rgb565;

    const LAYOUT: SegmentLayout = SegmentLayout::new(8, 4);

    fn transport(trace: &Trace, layout: SegmentLayout) -> PanelTransport<MockPin, MockPin> {
        let transport = PanelTransport::new(
            MockPin::new(PinRole::Dc, trace),
            MockPin::new(PinRole::Reset, trace),
            layout,
        );
        trace.borrow_mut().clear();
        transport
    }

    #[test]
    fn test_window_bytes_big_endian() {
        assert_eq!(window_bytes(0, 479), [0x00, 0x00, 0x01, 0xDF]);
        assert_eq!(window_bytes(160, 319), [0x00, 0xA0, 0x01, 0x3F]);
    }

    #[test]
    fn test_full_size_windows() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, SegmentLayout::PICO_RESTOUCH_35);

        panel.select_window(&mut bus, Segment::Upper).unwrap();
        panel.select_window(&mut bus, Segment::Lower).unwrap();

        assert_eq!(
            display_writes(&trace),
            vec![
                vec![0x2A],
                vec![0x00, 0x00, 0x01, 0xDF],
                vec![0x2B],
                vec![0x00, 0x00, 0x00, 0x9F],
                vec![0x2C],
                vec![0x2A],
                vec![0x00, 0x00, 0x01, 0xDF],
                vec![0x2B],
                vec![0x00, 0xA0, 0x01, 0x3F],
                vec![0x2C],
            ]
        );
    }

    #[test]
    fn test_command_sets_dc_before_each_write() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, LAYOUT);

        panel.command(&mut bus, 0x3A, &[0x55]).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec![
                Op::Dc(false),
                Op::DisplayCs(true),
                Op::Write(vec![0x3A]),
                Op::DisplayCs(false),
                Op::Dc(true),
                Op::DisplayCs(true),
                Op::Write(vec![0x55]),
                Op::DisplayCs(false),
            ]
        );
    }

    #[test]
    fn test_present_streams_buffer_after_window() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, LAYOUT);

        let mut storage = [0u8; 64];
        let mut buffer = SegmentBuffer::new(&mut storage, LAYOUT).unwrap();
        buffer.begin(Segment::Lower, Rgb565::BLUE);

        panel.present(&mut bus, &buffer).unwrap();

        let writes = display_writes(&trace);
        assert_eq!(writes.len(), 6);
        assert_eq!(writes[3], vec![0x00, 0x04, 0x00, 0x07]);
        assert_eq!(writes[4], vec![0x2C]);
        assert_eq!(writes[5], buffer.as_bytes().to_vec());
        assert_eq!(trace.borrow().iter().rev().nth(3), Some(&Op::Dc(true)));
    }

    #[test]
    fn test_present_rejects_foreign_layout() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, LAYOUT);

        let mut storage = [0u8; 128];
        let buffer = SegmentBuffer::new(&mut storage, SegmentLayout::new(8, 8)).unwrap();

        assert_eq!(
            panel.present(&mut bus, &buffer),
            Err(PanelError::LayoutMismatch)
        );
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn test_present_surfaces_bus_failure() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, LAYOUT);
        let mut storage = [0u8; 64];
        let buffer = SegmentBuffer::new(&mut storage, LAYOUT).unwrap();

        // Window commands succeed, the pixel stream fails
        bus.spi_mut().fail_writes_from = Some(5);

        assert_eq!(
            panel.present(&mut bus, &buffer),
            Err(PanelError::Bus(BusError::Spi(MockSpiError)))
        );
        assert!(bus.is_idle());
        assert_eq!(display_writes(&trace).len(), 5);
    }

    #[test]
    fn test_init_resets_then_runs_sequence() {
        let (mut bus, trace) = mock_bus(60_000_000);
        let mut panel = transport(&trace, LAYOUT);
        let mut delay = MockDelay::default();

        panel.init(&mut bus, &mut delay).unwrap();

        let ops = trace.borrow();
        assert_eq!(&ops[..3], &[Op::Reset(true), Op::Reset(false), Op::Reset(true)]);

        let writes = display_writes(&trace);
        assert_eq!(writes.first(), Some(&vec![cmd::INVERSION_ON]));
        assert!(writes.contains(&vec![cmd::SLEEP_OUT]));
        assert_eq!(writes.last(), Some(&vec![0x28]));
        // 5 + 10 + 5 ms reset plus 120 ms after sleep-out
        assert_eq!(delay.total_ns, 140_000_000);
    }
}
