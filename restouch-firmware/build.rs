//! Build script for restouch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and generates the `BOARD` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use restouch_core::config::BoardConfig;
use restouch_core::scene::DemoScene;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate board.toml
fn validate_config() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the restouch-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and field types; unknown keys are rejected
    let config: BoardConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    // Same checks the firmware runs at startup
    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Inconsistent board configuration                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e),
            explain(&config)
        );
    }

    println!("cargo:warning=board.toml validated successfully");
    config
}

/// One-line summary of the values validation looks at
fn explain(config: &BoardConfig) -> String {
    format!(
        "panel {}x{}, touch cal {}x{}, {} samples, {}/{} Hz",
        config.panel.layout.width,
        config.panel.layout.panel_height(),
        config.touch.calibration.display_width,
        config.touch.calibration.display_height,
        config.touch.samples,
        config.touch.touch_hz,
        config.panel.display_hz,
    )
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `board_config.rs` with the validated configuration as a constant
fn generate_config(config: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let demo = match config.demo {
        DemoScene::Keyboard => "DemoScene::Keyboard",
        DemoScene::SplitSquares => "DemoScene::SplitSquares",
    };

    let code = format!(
        "// Generated from board.toml by build.rs\n\
        pub const BOARD: BoardConfig = BoardConfig {{\n\
        \x20   panel: PanelConfig {{\n\
        \x20       layout: SegmentLayout::new({width}, {segment_height}),\n\
        \x20       display_hz: {display_hz},\n\
        \x20       background: Rgb565({background:#06X}),\n\
        \x20   }},\n\
        \x20   touch: TouchConfig {{\n\
        \x20       calibration: CalibrationParams {{\n\
        \x20           offset: {offset},\n\
        \x20           raw_span: {raw_span},\n\
        \x20           display_width: {display_width},\n\
        \x20           display_height: {display_height},\n\
        \x20       }},\n\
        \x20       touch_hz: {touch_hz},\n\
        \x20       samples: {samples},\n\
        \x20       settle_us: {settle_us},\n\
        \x20   }},\n\
        \x20   tick_ms: {tick_ms},\n\
        \x20   backlight_percent: {backlight_percent},\n\
        \x20   demo: {demo},\n\
        }};\n",
        width = config.panel.layout.width,
        segment_height = config.panel.layout.segment_height,
        display_hz = config.panel.display_hz,
        background = config.panel.background.raw(),
        offset = config.touch.calibration.offset,
        raw_span = config.touch.calibration.raw_span,
        display_width = config.touch.calibration.display_width,
        display_height = config.touch.calibration.display_height,
        touch_hz = config.touch.touch_hz,
        samples = config.touch.samples,
        settle_us = config.touch.settle_us,
        tick_ms = config.tick_ms,
        backlight_percent = config.backlight_percent,
        demo = demo,
    );

    fs::write(out_dir.join("board_config.rs"), code).unwrap();
}
