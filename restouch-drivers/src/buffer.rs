//! Half-height segment buffer
//!
//! Holds one segment's worth of pixels (480x160 at 16 bpp, 153600 bytes on
//! the target) in segment-local, row-major order with big-endian pixels,
//! which is exactly the byte stream the panel expects after `RAMWR`.
//!
//! The storage is borrowed so the firmware can place it in a static.

use restouch_core::{Rgb565, Segment, SegmentLayout, SegmentRect};

/// Errors when creating a segment buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Storage cannot hold one segment of the layout
    TooSmall { needed: usize, available: usize },
}

/// Pixel buffer for whichever segment is currently being composed
pub struct SegmentBuffer<'a> {
    data: &'a mut [u8],
    layout: SegmentLayout,
    segment: Segment,
}

impl<'a> SegmentBuffer<'a> {
    /// Wrap `storage`, which must hold at least `layout.buffer_len()` bytes
    pub fn new(storage: &'a mut [u8], layout: SegmentLayout) -> Result<Self, BufferError> {
        let needed = layout.buffer_len();
        if storage.len() < needed {
            return Err(BufferError::TooSmall {
                needed,
                available: storage.len(),
            });
        }

        Ok(Self {
            data: &mut storage[..needed],
            layout,
            segment: Segment::Upper,
        })
    }

    pub fn layout(&self) -> SegmentLayout {
        self.layout
    }

    /// Segment the buffer currently represents
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Start composing `segment`: switch to it and clear to `background`
    pub fn begin(&mut self, segment: Segment, background: Rgb565) {
        self.segment = segment;
        self.fill(background);
    }

    /// Fill the whole buffer with one color
    pub fn fill(&mut self, color: Rgb565) {
        let bytes = color.to_be_bytes();
        for pixel in self.data.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Paint one part of a split rectangle
    ///
    /// Returns `false` without touching the buffer when the part is
    /// degenerate or belongs to another segment. Rows and columns past the
    /// buffer edge are clipped.
    pub fn fill_rect(&mut self, rect: &SegmentRect) -> bool {
        if rect.is_degenerate() || rect.segment != self.segment {
            return false;
        }

        let width = self.layout.width as usize;
        let height = self.layout.segment_height as usize;
        let x0 = (rect.x as usize).min(width);
        let x1 = (rect.x as usize + rect.w as usize).min(width);
        let y0 = (rect.y as usize).min(height);
        let y1 = (rect.y as usize + rect.h as usize).min(height);
        if x0 == x1 || y0 == y1 {
            return false;
        }

        let bytes = rect.color.to_be_bytes();
        for row in y0..y1 {
            let start = (row * width + x0) * 2;
            let end = (row * width + x1) * 2;
            for pixel in self.data[start..end].chunks_exact_mut(2) {
                pixel.copy_from_slice(&bytes);
            }
        }

        true
    }

    /// Color at a segment-local position
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.layout.width || y >= self.layout.segment_height {
            return None;
        }
        let index = (y as usize * self.layout.width as usize + x as usize) * 2;
        Some(Rgb565(u16::from_be_bytes([
            self.data[index],
            self.data[index + 1],
        ])))
    }

    /// Raw byte stream for the panel
    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }
}
