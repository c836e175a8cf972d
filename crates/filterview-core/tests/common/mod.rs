#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use filterview_core::config::PreviewConfig;
use filterview_core::error::{PreviewError, Result};
use filterview_core::geometry::{NormalizedRect, PixelSize};
use filterview_core::preview::{PreviewController, PreviewSignal, RequestId};
use filterview_core::source::{ImageSource, InputMode};
use filterview_core::timer::Clock;
use image::{Rgba, RgbaImage};

/// Clock whose time only moves when a test advances it.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Image source producing flat crops of the right size and counting fetches.
pub struct FakeSource {
    pub size: PixelSize,
    pub fetches: Cell<usize>,
    pub fail: Cell<bool>,
}

impl FakeSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: PixelSize::new(width, height),
            fetches: Cell::new(0),
            fail: Cell::new(false),
        }
    }
}

impl ImageSource for FakeSource {
    fn extent(&self, _mode: InputMode) -> PixelSize {
        self.size
    }

    fn cropped_image(&self, rect: &NormalizedRect, _mode: InputMode) -> Result<RgbaImage> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail.get() {
            return Err(PreviewError::NoInput("test".into()));
        }
        let window = rect.to_pixels(self.size);
        Ok(RgbaImage::from_pixel(
            window.width,
            window.height,
            Rgba([128, 128, 128, 255]),
        ))
    }
}

/// Controller over a `full_w`x`full_h` fake image in a `widget_w`x`widget_h`
/// widget, with the setup update already requested and all signals drained.
pub fn controller(
    full_w: u32,
    full_h: u32,
    widget_w: u32,
    widget_h: u32,
) -> (PreviewController<FakeSource>, ManualClock) {
    let clock = ManualClock::new();
    let mut c = PreviewController::with_clock(
        FakeSource::new(full_w, full_h),
        &PreviewConfig::default(),
        clock.clone(),
    );
    c.resize(PixelSize::new(widget_w, widget_h));
    c.refresh_full_image_size();
    settle(&mut c, &clock);
    (c, clock)
}

/// Let the debounce timer fire and drain signals.
pub fn settle(c: &mut PreviewController<FakeSource>, clock: &ManualClock) {
    clock.advance(Duration::from_secs(1));
    c.poll_timers();
    c.take_signals();
}

pub fn update_requests(signals: &[PreviewSignal]) -> Vec<RequestId> {
    signals
        .iter()
        .filter_map(|s| match s {
            PreviewSignal::PreviewUpdateRequested(id) => Some(*id),
            _ => None,
        })
        .collect()
}

pub fn zoom_signals(signals: &[PreviewSignal]) -> Vec<f64> {
    signals
        .iter()
        .filter_map(|s| match s {
            PreviewSignal::ZoomChanged(z) => Some(*z),
            _ => None,
        })
        .collect()
}

pub fn assert_rect_inside(rect: &NormalizedRect) {
    assert!(
        rect.is_inside_image(),
        "rect escaped the image: {rect:?}"
    );
}
