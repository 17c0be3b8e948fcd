//! Panel task: the fixed-cadence tick loop
//!
//! Each tick samples touch first, so the bus is back at display speed and
//! both chip selects are released before any pixel is sent, then composes
//! and presents both segments of the current scene.

use defmt::*;
use embassy_rp::peripherals::SPI1;
use embassy_time::{Delay, Duration, Ticker};

use restouch_core::input::{Edge, EdgeDetector};
use restouch_core::scene::{DemoScene, KeyboardDemo, SPLIT_SQUARES};
use restouch_core::Rect;
use restouch_drivers::{FrameDriver, FrameError, SharedBus, TouchSampler};
use restouch_hal_rp2040::{RpInput, RpOutput, RpSpiBus};

use crate::config::BOARD;

pub type PanelBus = SharedBus<RpSpiBus<'static, SPI1>, RpOutput<'static>, RpOutput<'static>>;
pub type PanelFrame = FrameDriver<'static, RpOutput<'static>, RpOutput<'static>>;
pub type PanelTouch = TouchSampler<RpInput<'static>>;

/// Panel task - owns the bus, runs init, then renders every tick
#[embassy_executor::task]
pub async fn panel_task(mut bus: PanelBus, mut frame: PanelFrame, mut touch: PanelTouch) {
    info!("Panel task started");

    let mut delay = Delay;
    if let Err(e) = frame.transport_mut().init(&mut bus, &mut delay) {
        error!("Panel init failed: {}", e);
        return;
    }
    info!("Panel initialized");

    let layout = BOARD.panel.layout;
    let mut ticker = Ticker::every(Duration::from_millis(BOARD.tick_ms as u64));
    let mut keyboard = KeyboardDemo::default();
    let mut pen = EdgeDetector::new();
    let mut frame_count: u32 = 0;

    loop {
        ticker.next().await;

        let point = match touch.poll(&mut bus, &mut delay) {
            Ok(point) => point,
            Err(e) => {
                warn!("Touch poll failed: {}", e);
                None
            }
        };

        match pen.update(point.is_some()) {
            Edge::Pressed => debug!("Touch down at {}", point),
            Edge::Released => debug!("Touch up"),
            Edge::None => {}
        }

        let icon;
        let scene: &[Rect] = match BOARD.demo {
            DemoScene::Keyboard => {
                if keyboard.update(point) {
                    debug!("Keyboard icon inverted={}", keyboard.is_inverted());
                }
                icon = keyboard.scene(&layout);
                &icon
            }
            DemoScene::SplitSquares => &SPLIT_SQUARES,
        };

        match frame.render(&mut bus, scene) {
            Ok(stats) => trace!("Frame {}: {}", frame_count, stats),
            Err(FrameError::Panel(e)) => {
                // No retry: the lower segment may now show the previous frame
                error!("Panel transport failed: {}, display halted", e);
                return;
            }
            Err(e) => warn!("Frame {} skipped: {}", frame_count, e),
        }

        frame_count = frame_count.wrapping_add(1);
    }
}
