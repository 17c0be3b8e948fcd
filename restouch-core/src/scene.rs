//! Demo scenes
//!
//! Draw-request lists for the two demos the firmware can run: a clickable
//! keyboard icon parked in a panel corner, and three stacked squares that
//! show a rectangle landing entirely in the upper band, one straddling the
//! band boundary and one entirely in the lower band.

use crate::color::Rgb565;
use crate::geometry::{Rect, SegmentLayout};
use crate::touch::TouchPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Draw requests in the keyboard icon: outline, inset, 18 keys, space bar
pub const ICON_RECTS: usize = 21;

/// Keyboard icon draw requests in painting order
pub type KeyboardIcon = [Rect; ICON_RECTS];

pub const ICON_WIDTH: i32 = 68;
pub const ICON_HEIGHT: i32 = 32;

/// Which demo the firmware renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DemoScene {
    #[default]
    Keyboard,
    SplitSquares,
}

/// Panel corner an icon is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// Top-left position of a `w` x `h` box in this corner
    pub fn origin(self, layout: &SegmentLayout, w: i32, h: i32) -> (i32, i32) {
        let right = layout.width as i32 - w;
        let bottom = layout.panel_height() as i32 - h;
        match self {
            Corner::NorthWest => (0, 0),
            Corner::NorthEast => (right, 0),
            Corner::SouthWest => (0, bottom),
            Corner::SouthEast => (right, bottom),
        }
    }
}

/// Keyboard icon: outline, 3 rows of 6 keys and a space bar
///
/// `inverted` swaps foreground and background.
pub fn keyboard_icon(corner: Corner, layout: &SegmentLayout, inverted: bool) -> KeyboardIcon {
    let (fg, bg) = if inverted {
        (Rgb565::WHITE, Rgb565::BLACK)
    } else {
        (Rgb565::BLACK, Rgb565::WHITE)
    };
    let (x, y) = corner.origin(layout, ICON_WIDTH, ICON_HEIGHT);

    let outline = Rect::new(x, y, ICON_WIDTH, ICON_HEIGHT, fg);
    let mut icon = [outline; ICON_RECTS];
    icon[1] = outline.inset(2, bg);
    // Keys column by column, three rows each
    for (i, key) in icon[2..ICON_RECTS - 1].iter_mut().enumerate() {
        let column = (i / 3) as i32;
        let row = [6, 14, 22][i % 3];
        *key = Rect::new(x + 6 + 10 * column, y + row, 4, 4, fg);
    }
    icon[ICON_RECTS - 1] = Rect::new(x + 18, y + 22, 28, 4, fg);
    icon
}

/// Blue, green and red 40x40 squares down the left side
///
/// The first sits in the upper band, the second straddles the boundary and
/// the third sits in the lower band.
pub const SPLIT_SQUARES: [Rect; 3] = [
    Rect::new(40, 80, 40, 40, Rgb565::BLUE),
    Rect::new(40, 140, 40, 40, Rgb565::GREEN),
    Rect::new(40, 200, 40, 40, Rgb565::RED),
];

/// Keyboard icon that inverts while pressed
///
/// The touch hit box is in calibrated touch coordinates, which on this
/// panel run bottom-up relative to the display rows: the default box
/// matches the icon in the south-east corner.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardDemo {
    corner: Corner,
    hit_box: (u16, u16, u16, u16),
    inverted: bool,
}

impl KeyboardDemo {
    /// Half-open touch box `(x0, y0, x1, y1)` of the south-east icon
    pub const SOUTH_EAST_HIT_BOX: (u16, u16, u16, u16) = (421, 0, 480, 32);

    pub const fn new(corner: Corner, hit_box: (u16, u16, u16, u16)) -> Self {
        Self {
            corner,
            hit_box,
            inverted: false,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Feed this tick's touch; returns true when the icon changed
    ///
    /// A touch inside the hit box inverts the icon, releasing restores it.
    /// A touch elsewhere leaves it as it was.
    pub fn update(&mut self, touch: Option<TouchPoint>) -> bool {
        let (x0, y0, x1, y1) = self.hit_box;
        let inverted = match touch {
            Some(point) if point.hits(x0, y0, x1, y1) => true,
            Some(_) => self.inverted,
            None => false,
        };
        let changed = inverted != self.inverted;
        self.inverted = inverted;
        changed
    }

    pub fn scene(&self, layout: &SegmentLayout) -> KeyboardIcon {
        keyboard_icon(self.corner, layout, self.inverted)
    }
}

impl Default for KeyboardDemo {
    fn default() -> Self {
        Self::new(Corner::SouthEast, Self::SOUTH_EAST_HIT_BOX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{split, Segment};

    const LAYOUT: SegmentLayout = SegmentLayout::PICO_RESTOUCH_35;

    #[test]
    fn test_icon_sits_in_south_east_corner() {
        let scene = keyboard_icon(Corner::SouthEast, &LAYOUT, false);
        assert_eq!(scene[0], Rect::new(412, 288, 68, 32, Rgb565::BLACK));
        assert_eq!(scene[1], Rect::new(414, 290, 64, 28, Rgb565::WHITE));
        // First key column, then the last key of the last column
        assert_eq!(scene[2], Rect::new(418, 294, 4, 4, Rgb565::BLACK));
        assert_eq!(scene[4], Rect::new(418, 310, 4, 4, Rgb565::BLACK));
        assert_eq!(scene[19], Rect::new(468, 310, 4, 4, Rgb565::BLACK));
        assert_eq!(scene[20], Rect::new(430, 310, 28, 4, Rgb565::BLACK));
    }

    #[test]
    fn test_every_icon_request_is_valid_in_every_corner() {
        for corner in [
            Corner::NorthWest,
            Corner::NorthEast,
            Corner::SouthWest,
            Corner::SouthEast,
        ] {
            for rect in keyboard_icon(corner, &LAYOUT, true) {
                assert!(split(rect, LAYOUT).is_ok(), "{corner:?} {rect:?}");
            }
        }
    }

    #[test]
    fn test_inverted_swaps_colors() {
        let scene = keyboard_icon(Corner::NorthWest, &LAYOUT, true);
        assert_eq!(scene[0].color, Rgb565::WHITE);
        assert_eq!(scene[1].color, Rgb565::BLACK);
        assert_eq!(scene[0].x, 0);
        assert_eq!(scene[0].y, 0);
    }

    #[test]
    fn test_split_squares_cover_both_bands() {
        let parts: std::vec::Vec<Segment> = SPLIT_SQUARES
            .into_iter()
            .flat_map(|rect| split(rect, LAYOUT).unwrap())
            .map(|part| part.segment)
            .collect();
        assert_eq!(
            parts,
            [Segment::Upper, Segment::Upper, Segment::Lower, Segment::Lower]
        );
    }

    #[test]
    fn test_demo_inverts_while_pressed() {
        let mut demo = KeyboardDemo::default();

        assert!(!demo.update(None));
        assert!(demo.update(Some(TouchPoint::new(450, 10))));
        assert!(demo.is_inverted());

        // Sliding off the icon keeps the state
        assert!(!demo.update(Some(TouchPoint::new(100, 200))));
        assert!(demo.is_inverted());

        assert!(demo.update(None));
        assert!(!demo.is_inverted());
    }

    #[test]
    fn test_hit_box_edges() {
        let mut demo = KeyboardDemo::default();
        assert!(!demo.update(Some(TouchPoint::new(420, 10))));
        assert!(!demo.update(Some(TouchPoint::new(450, 32))));
        assert!(demo.update(Some(TouchPoint::new(421, 31))));
    }
}
