//! Restouch - split-frame firmware for the Pico-ResTouch-LCD-3.5
//!
//! The RP2040 cannot hold a 480x320x16bpp frame, so each frame is composed
//! twice through one 160-row buffer: once for the upper scan window, once
//! for the lower. The resistive touch controller shares the display's SPI
//! bus and is sampled at its own, slower clock between frames.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use restouch_drivers::{FrameDriver, PanelTransport, SegmentBuffer, SharedBus, TouchSampler};
use restouch_hal::SpiConfig;
use restouch_hal_rp2040::{Backlight, RpInput, RpOutput, RpSpiBus};

use crate::config::{BOARD, SEGMENT_BUF_LEN};

mod config;
mod tasks;

// One segment of pixels (153600 bytes at 480x160); kept out of the stack
static SEGMENT_BUF: ConstStaticCell<[u8; SEGMENT_BUF_LEN]> =
    ConstStaticCell::new([0; SEGMENT_BUF_LEN]);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Restouch firmware starting...");

    if let Err(e) = BOARD.validate() {
        error!("Invalid board configuration: {}", e);
        return;
    }
    let layout = BOARD.panel.layout;
    info!(
        "Panel {}x{} in two {}-row segments, tick {} ms",
        layout.width,
        layout.panel_height(),
        layout.segment_height,
        BOARD.tick_ms
    );

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Shared SPI1: SCK=GPIO10, MOSI=GPIO11, MISO=GPIO12
    let spi = Spi::new_blocking(
        p.SPI1,
        p.PIN_10,
        p.PIN_11,
        p.PIN_12,
        embassy_rp::spi::Config::default(),
    );
    let spi = RpSpiBus::new(spi, SpiConfig::mode0(BOARD.panel.display_hz));

    // Chip selects: display GPIO9, touch GPIO16
    let display_cs = RpOutput::new(Output::new(p.PIN_9, Level::High));
    let touch_cs = RpOutput::new(Output::new(p.PIN_16, Level::High));
    let bus = SharedBus::new(spi, display_cs, touch_cs);

    // DC GPIO8, reset GPIO15
    let dc = RpOutput::new(Output::new(p.PIN_8, Level::High));
    let rst = RpOutput::new(Output::new(p.PIN_15, Level::High));
    let transport = PanelTransport::new(dc, rst, layout);

    let buffer = match SegmentBuffer::new(SEGMENT_BUF.take(), layout) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("Segment buffer: {}", e);
            return;
        }
    };
    let frame = FrameDriver::new(transport, buffer, BOARD.panel.background);

    // Touch IRQ GPIO17 (active low)
    let irq = RpInput::new(Input::new(p.PIN_17, Pull::Up));
    let touch = TouchSampler::new(irq, BOARD.touch);

    info!("Display and touch wired");

    // Backlight GPIO13 (PWM slice 6, channel B)
    let mut backlight = Backlight::new(Pwm::new_output_b(
        p.PWM_SLICE6,
        p.PIN_13,
        Default::default(),
    ));
    backlight.set_duty_u16(BOARD.backlight_duty_u16());
    info!("Backlight at {}%", BOARD.backlight_percent);

    spawner.spawn(tasks::panel_task(bus, frame, touch)).unwrap();

    info!("All tasks spawned, firmware running");

    // All rendering happens in the panel task; `backlight` stays owned here
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
