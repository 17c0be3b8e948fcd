//! 16-bit panel colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packed 16-bit color as the panel consumes it
///
/// The panel is configured for 16 bits per pixel (`COLMOD 0x55`) with the
/// memory access control byte `0x28`, which swaps the red and blue fields.
/// The named constants below are the values that show up as that color
/// on this board, not textbook RGB565.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const RED: Self = Self(0x07E0);
    pub const GREEN: Self = Self(0x001F);
    pub const BLUE: Self = Self(0xF800);
    pub const WHITE: Self = Self(0xFFFF);
    pub const BLACK: Self = Self(0x0000);

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Bytes in wire order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Bitwise complement, used for inverted highlights
    pub const fn inverted(self) -> Self {
        Self(!self.0)
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
