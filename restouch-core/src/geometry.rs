//! Rectangle geometry and the two-segment splitter
//!
//! The panel is 480x320 but the segment buffer only holds 160 rows, so a
//! frame is composed as two bands of equal height: `Upper` covers absolute
//! rows `[0, H)` and `Lower` covers `[H, 2H)`. Every draw request is split
//! into at most one part per band, with `y` rewritten to band-local rows.
//!
//! # Example
//!
//! ```text
//!   y=140 ┌────────┐            Upper: y=140 h=20
//!   ------│--------│-- H=160 ->
//!   y=180 └────────┘            Lower: y=0   h=20
//! ```

use heapless::Vec;

use crate::color::Rgb565;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of segments the panel is split into
pub const SEGMENT_COUNT: usize = 2;

/// Tallest segment whose rows the controller's 16-bit window can address
pub const MAX_SEGMENT_HEIGHT: u16 = 32_768;

/// Parts produced by splitting one rectangle
pub type Split = Vec<SegmentRect, SEGMENT_COUNT>;

/// Band of panel rows that fits in the segment buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Segment {
    /// Absolute rows `[0, H)`
    Upper,
    /// Absolute rows `[H, 2H)`
    Lower,
}

impl Segment {
    /// All segments in presentation order
    pub const ALL: [Segment; SEGMENT_COUNT] = [Segment::Upper, Segment::Lower];

    /// Position of the segment from the top of the panel
    pub const fn index(self) -> u16 {
        match self {
            Segment::Upper => 0,
            Segment::Lower => 1,
        }
    }

    /// First absolute panel row covered by this segment
    pub const fn row_offset(self, segment_height: u16) -> u32 {
        self.index() as u32 * segment_height as u32
    }
}

/// Panel geometry as seen by the compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SegmentLayout {
    /// Panel width in pixels (full column range of every segment)
    pub width: u16,
    /// Rows per segment, i.e. the row capacity of the segment buffer
    pub segment_height: u16,
}

impl SegmentLayout {
    /// Pico-ResTouch-LCD-3.5 in landscape: 480x320 as two 160-row bands
    pub const PICO_RESTOUCH_35: Self = Self::new(480, 160);

    pub const fn new(width: u16, segment_height: u16) -> Self {
        Self {
            width,
            segment_height,
        }
    }

    /// Total panel height in rows
    pub const fn panel_height(&self) -> u32 {
        self.segment_height as u32 * SEGMENT_COUNT as u32
    }

    /// Bytes needed to hold one segment at 16 bits per pixel
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.segment_height as usize * 2
    }

    /// Inclusive absolute row range `(first, last)` of a segment
    ///
    /// Saturates at `u16::MAX` when `segment_height` exceeds
    /// [`MAX_SEGMENT_HEIGHT`].
    pub fn rows(&self, segment: Segment) -> (u16, u16) {
        let first = segment.row_offset(self.segment_height);
        let last = (first + self.segment_height as u32).saturating_sub(1);
        (
            u16::try_from(first).unwrap_or(u16::MAX),
            u16::try_from(last).unwrap_or(u16::MAX),
        )
    }

    /// Inclusive column range `(first, last)`; every segment spans the full width
    pub const fn columns(&self) -> (u16, u16) {
        (0, self.width.saturating_sub(1))
    }
}

impl Default for SegmentLayout {
    fn default() -> Self {
        Self::PICO_RESTOUCH_35
    }
}

/// Filled rectangle in absolute panel coordinates
///
/// Fields are signed so a malformed request can be represented and
/// rejected by [`split`] instead of wrapping silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub color: Rgb565,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Self {
        Self { x, y, w, h, color }
    }

    /// Rectangle shrunk by `margin` pixels on every side
    ///
    /// Used for outlines: draw the outer rect, then the inset one in the
    /// background color.
    pub const fn inset(self, margin: i32, color: Rgb565) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: self.w - 2 * margin,
            h: self.h - 2 * margin,
            color,
        }
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        if self.w <= 0 || self.h <= 0 {
            return 0;
        }
        self.w as u64 * self.h as u64
    }
}

/// A [`Rect`] assigned to one segment, with `y` in segment-local rows
///
/// Invariant: `y + h <= segment_height` of the layout it was split for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentRect {
    pub segment: Segment,
    pub x: u16,
    /// Segment-local row
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub color: Rgb565,
}

impl SegmentRect {
    /// True when the part covers no pixels and must be skipped
    pub const fn is_degenerate(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.w as u32 * self.h as u32
    }

    /// First absolute panel row of this part
    pub const fn absolute_y(&self, layout: &SegmentLayout) -> u32 {
        self.segment.row_offset(layout.segment_height) + self.y as u32
    }
}

/// Reasons a draw request is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Width is negative
    NegativeWidth,
    /// Height is negative
    NegativeHeight,
    /// `y` is negative
    NegativeOrigin,
    /// Rectangle extends past the panel's last row
    ExceedsPanel,
    /// Layout has zero width or zero segment height
    EmptyLayout,
}

/// Split a rectangle into its per-segment parts
///
/// Returns one part when the rectangle lies inside a single segment and two
/// when it straddles the boundary. The parts are pixel-disjoint and together
/// cover exactly the input's rows. A zero-height part is never produced by
/// the straddle case; a zero-area input still yields one (degenerate) part,
/// which consumers skip.
///
/// Columns are clipped to the panel width; columns entirely off the panel
/// leave a zero-width part. Rows are not clipped: a negative size, a
/// negative `y` or a bottom edge past the last row is rejected.
pub fn split(rect: Rect, layout: SegmentLayout) -> Result<Split, GeometryError> {
    if layout.width == 0 || layout.segment_height == 0 {
        return Err(GeometryError::EmptyLayout);
    }
    if rect.w < 0 {
        return Err(GeometryError::NegativeWidth);
    }
    if rect.h < 0 {
        return Err(GeometryError::NegativeHeight);
    }
    if rect.y < 0 {
        return Err(GeometryError::NegativeOrigin);
    }

    let seg_h = layout.segment_height as i64;
    let panel_h = layout.panel_height() as i64;
    let y1 = rect.y as i64;
    let y2 = y1 + rect.h as i64;
    if y2 > panel_h {
        return Err(GeometryError::ExceedsPanel);
    }

    let width = layout.width as i64;
    let x1 = (rect.x as i64).clamp(0, width);
    let x2 = (rect.x as i64 + rect.w as i64).clamp(0, width);

    // All values below fit in u16: columns are within the width, part rows
    // and heights within H (a zero-height rect at y == 2H lands at local H).
    let part = |segment: Segment, y: i64, h: i64| SegmentRect {
        segment,
        x: x1 as u16,
        y: y as u16,
        w: (x2 - x1) as u16,
        h: h as u16,
        color: rect.color,
    };

    let mut parts = Split::new();
    let pushed = match (y1 / seg_h, y2 / seg_h) {
        (0, 0) => parts.push(part(Segment::Upper, y1, rect.h as i64)),
        (0, _) => {
            // Straddles the boundary at row H
            let spill = y2 - seg_h;
            parts
                .push(part(Segment::Upper, y1, seg_h - y1))
                .and_then(|_| {
                    if spill > 0 {
                        parts.push(part(Segment::Lower, 0, spill))
                    } else {
                        Ok(())
                    }
                })
        }
        (_, _) => parts.push(part(Segment::Lower, y1 - seg_h, rect.h as i64)),
    };
    // Capacity is SEGMENT_COUNT and at most two parts are pushed.
    pushed.map_err(|_| GeometryError::ExceedsPanel)?;

    Ok(parts)
}
