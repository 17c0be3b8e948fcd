//! Frame driver
//!
//! Composites one frame per tick in two passes over a single half-height
//! buffer. Every draw request is split first, so a malformed request fails
//! the frame before anything reaches the bus. Then for Upper and Lower in
//! turn the buffer is cleared, that segment's parts are painted in request
//! order and the buffer is presented.
//!
//! There is no full-frame commit: if the lower present fails, the panel
//! shows a fresh upper half over a stale lower half until the next frame.

use heapless::Vec;
use restouch_core::geometry::{split, GeometryError, Split};
use restouch_core::{Rect, Rgb565, Segment};
use restouch_hal::{ClockedBus, OutputPin};

use crate::buffer::SegmentBuffer;
use crate::bus::SharedBus;
use crate::panel::{PanelError, PanelTransport};

/// Maximum draw requests per frame
pub const MAX_RECTS: usize = 64;

/// Per-frame paint counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Parts painted into the upper segment
    pub upper: usize,
    /// Parts painted into the lower segment
    pub lower: usize,
    /// Zero-area parts dropped
    pub skipped: usize,
}

/// Frame rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError<E> {
    /// A draw request was rejected by the splitter
    Geometry(GeometryError),
    /// More draw requests than [`MAX_RECTS`]
    TooManyRects,
    /// Presenting a segment failed
    Panel(PanelError<E>),
}

impl<E> From<GeometryError> for FrameError<E> {
    fn from(e: GeometryError) -> Self {
        FrameError::Geometry(e)
    }
}

impl<E> From<PanelError<E>> for FrameError<E> {
    fn from(e: PanelError<E>) -> Self {
        FrameError::Panel(e)
    }
}

/// Owns the transport and the segment buffer
pub struct FrameDriver<'a, DC, RST> {
    transport: PanelTransport<DC, RST>,
    buffer: SegmentBuffer<'a>,
    background: Rgb565,
}

impl<'a, DC, RST> FrameDriver<'a, DC, RST>
where
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(
        transport: PanelTransport<DC, RST>,
        buffer: SegmentBuffer<'a>,
        background: Rgb565,
    ) -> Self {
        Self {
            transport,
            buffer,
            background,
        }
    }

    pub fn transport_mut(&mut self) -> &mut PanelTransport<DC, RST> {
        &mut self.transport
    }

    /// Buffer as left by the last pass
    pub fn buffer(&self) -> &SegmentBuffer<'a> {
        &self.buffer
    }

    pub fn set_background(&mut self, background: Rgb565) {
        self.background = background;
    }

    /// Render one frame from draw requests in painting order
    pub fn render<SPI, DCS, TCS>(
        &mut self,
        bus: &mut SharedBus<SPI, DCS, TCS>,
        rects: &[Rect],
    ) -> Result<FrameStats, FrameError<SPI::Error>>
    where
        SPI: ClockedBus,
        DCS: OutputPin,
        TCS: OutputPin,
    {
        let layout = self.transport.layout();
        let mut parts: Vec<Split, MAX_RECTS> = Vec::new();
        for rect in rects {
            parts
                .push(split(*rect, layout)?)
                .map_err(|_| FrameError::TooManyRects)?;
        }

        let mut stats = FrameStats::default();
        for segment in Segment::ALL {
            self.buffer.begin(segment, self.background);

            for part in parts.iter().flatten().filter(|p| p.segment == segment) {
                if !self.buffer.fill_rect(part) {
                    stats.skipped += 1;
                    continue;
                }
                match segment {
                    Segment::Upper => stats.upper += 1,
                    Segment::Lower => stats.lower += 1,
                }
            }

            self.transport.present(bus, &self.buffer)?;
        }

        Ok(stats)
    }
}
