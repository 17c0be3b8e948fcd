//! Board configuration compiled in from board.toml
//!
//! `build.rs` has already parsed and validated the file; this module only
//! exposes the result and the sizes derived from it.

use restouch_core::config::{BoardConfig, PanelConfig, TouchConfig};
use restouch_core::scene::DemoScene;
use restouch_core::{CalibrationParams, Rgb565, SegmentLayout};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Bytes in one segment buffer
pub const SEGMENT_BUF_LEN: usize = BOARD.panel.layout.buffer_len();
