//! Interactive preview pane model.
//!
//! [`PreviewController`] tracks which part of the full image is visible, at
//! which zoom, and whether the pane currently shows the unprocessed crop or
//! the last rendered preview. Every viewport change first shows the cheap
//! original crop, then arms a debounce timer; when the timer fires a single
//! [`PreviewSignal::PreviewUpdateRequested`] is queued for the renderer.
//!
//! The controller is host agnostic. A GUI host feeds it [`PreviewEvent`]s,
//! polls its timers, drains [`PreviewSignal`]s and paints
//! [`PreviewController::display_frame`].

mod crop;
mod events;
mod names;
mod zoom;

use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::{debug, trace};

use crate::config::{PreviewConfig, PreviewFactor};
use crate::geometry::{NormalizedPoint, NormalizedRect, PixelPoint, PixelRect, PixelSize};
use crate::source::{ImageSource, InputMode};
use crate::timer::{Clock, SystemClock, TimerId, TimerQueue};

pub use crop::{CropCache, DisplayFrame};
pub use events::{PointerButton, PreviewEvent};
pub use names::rescale_position_name;

/// Identity of a preview update request. Renderer results must quote it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Notifications for the host UI, drained with [`PreviewController::take_signals`].
#[derive(Clone, Debug, PartialEq)]
pub enum PreviewSignal {
    ZoomChanged(f64),
    PreviewUpdateRequested(RequestId),
    VisibleRectChanging,
}

/// What the pane is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// The unprocessed crop of the full image.
    #[default]
    ShowingOriginal,
    /// The renderer's last result (or its error overlay).
    ShowingPreview,
}

pub struct PreviewController<S: ImageSource> {
    source: S,
    clock: Box<dyn Clock>,

    debounce_delay: Duration,
    max_zoom: f64,
    zoom_step: f64,
    input_mode: InputMode,

    widget_size: PixelSize,
    full_image_size: PixelSize,
    visible_rect: NormalizedRect,
    saved_center: NormalizedPoint,
    zoom: f64,
    preview_factor: PreviewFactor,

    crop: CropCache,
    original_size: PixelSize,
    /// Size a preview matching the original crop is expected to have; `None`
    /// once a differently sized preview has been placed.
    expected_preview_size: Option<PixelSize>,
    image_position: PixelRect,

    saved_preview: Option<RgbaImage>,
    saved_preview_valid: bool,
    error_message: Option<String>,
    state: PreviewState,

    preview_enabled: bool,
    right_click_enabled: bool,
    visible: bool,
    pending_resize: bool,
    drag_anchor: Option<PixelPoint>,

    timers: TimerQueue,
    update_timer: Option<TimerId>,
    generation: u64,

    signals: Vec<PreviewSignal>,
    repaint: bool,
}

impl<S: ImageSource> PreviewController<S> {
    pub fn new(source: S, config: &PreviewConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }

    pub fn with_clock(source: S, config: &PreviewConfig, clock: impl Clock + 'static) -> Self {
        let visible_rect = NormalizedRect::FULL;
        Self {
            source,
            clock: Box::new(clock),
            debounce_delay: config.debounce_delay(),
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            input_mode: config.input_mode,
            widget_size: PixelSize::default(),
            full_image_size: PixelSize::default(),
            visible_rect,
            saved_center: visible_rect.center(),
            zoom: 1.0,
            preview_factor: config.preview_factor,
            crop: CropCache::default(),
            original_size: PixelSize::default(),
            expected_preview_size: None,
            image_position: PixelRect::default(),
            saved_preview: None,
            saved_preview_valid: false,
            error_message: None,
            state: PreviewState::ShowingOriginal,
            preview_enabled: true,
            right_click_enabled: config.right_click_peek,
            visible: true,
            pending_resize: false,
            drag_anchor: None,
            timers: TimerQueue::new(),
            update_timer: None,
            generation: 0,
            signals: Vec::new(),
            repaint: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn visible_rect(&self) -> NormalizedRect {
        self.visible_rect
    }

    pub fn current_zoom_factor(&self) -> f64 {
        self.zoom
    }

    pub fn widget_size(&self) -> PixelSize {
        self.widget_size
    }

    pub fn full_image_size(&self) -> PixelSize {
        self.full_image_size
    }

    pub fn saved_center(&self) -> NormalizedPoint {
        self.saved_center
    }

    pub fn preview_factor(&self) -> PreviewFactor {
        self.preview_factor
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.input_mode != mode {
            self.input_mode = mode;
            self.crop.invalidate();
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn is_at_full_zoom(&self) -> bool {
        self.visible_rect.is_full()
    }

    pub fn is_preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn is_saved_preview_valid(&self) -> bool {
        self.saved_preview_valid
    }

    pub fn saved_preview(&self) -> Option<&RgbaImage> {
        self.saved_preview.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize
    }

    pub fn is_update_timer_armed(&self) -> bool {
        self.update_timer.is_some()
    }

    /// Request id the next renderer result must carry to be displayed.
    pub fn current_request(&self) -> RequestId {
        RequestId(self.generation)
    }

    /// Placement of the displayed image inside the widget, as of the last layout.
    pub fn image_position(&self) -> PixelRect {
        self.image_position
    }

    // ------------------------------------------------------------------
    // Host notifications
    // ------------------------------------------------------------------

    /// Drain the signals emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<PreviewSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Whether the pane needs repainting; clears the flag.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    fn emit(&mut self, signal: PreviewSignal) {
        trace!(?signal, "preview signal");
        self.signals.push(signal);
    }

    fn emit_zoom_changed(&mut self) {
        self.emit(PreviewSignal::ZoomChanged(self.zoom));
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    // ------------------------------------------------------------------
    // Image and widget geometry
    // ------------------------------------------------------------------

    /// Set the size of the full image the visible rect refers to.
    ///
    /// At full zoom the zoom is refit so the whole image stays visible.
    pub fn set_full_image_size(&mut self, size: PixelSize) {
        self.full_image_size = size;
        self.crop.invalidate();
        if self.is_at_full_zoom() {
            if let Some(fit) = self.fit_zoom() {
                self.zoom = fit;
                self.emit_zoom_changed();
            }
        } else {
            self.update_visible_rect();
        }
        self.save_visible_center();
        debug!(%size, zoom = self.zoom, "full image size set");
    }

    /// Query the image source for the full extent of the current input mode.
    pub fn refresh_full_image_size(&mut self) {
        let size = self.source.extent(self.input_mode);
        self.set_full_image_size(size);
    }

    /// Track whether the host window is currently shown.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Widget size change.
    ///
    /// While the widget is visible the change goes through the debounce cycle.
    /// A resize of a hidden widget (window being restored, maximize animation)
    /// only marks the preview as pending; the update is requested on the next
    /// window activation or mouse release.
    pub fn resize(&mut self, size: PixelSize) {
        self.widget_size = size;
        if size.is_empty() {
            trace!(%size, "ignoring resize to empty widget");
            return;
        }
        let before = (self.visible_rect, self.zoom);
        if !self.full_image_size.is_empty() {
            if self.is_at_full_zoom() {
                if let Some(fit) = self.fit_zoom() {
                    self.zoom = fit;
                }
                self.emit_zoom_changed();
            } else {
                self.update_visible_rect();
                self.visible_rect.move_center(self.saved_center);
                self.save_visible_center();
            }
        }
        if self.visible {
            self.on_preview_parameters_changed();
        } else {
            self.pending_resize = true;
            self.display_original_image();
            if (self.visible_rect, self.zoom) != before {
                // an in-flight render covers the old rect
                self.invalidate_saved_preview();
                self.supersede_requests();
            }
        }
    }

    /// Apply a resize that was deferred while the widget was hidden.
    pub fn flush_pending_resize(&mut self) -> bool {
        if !self.pending_resize {
            return false;
        }
        self.pending_resize = false;
        if self.widget_size.is_empty() {
            return false;
        }
        self.update_visible_rect();
        self.save_visible_center();
        self.send_update_request();
        true
    }

    fn save_visible_center(&mut self) {
        self.saved_center = self.visible_rect.center();
    }

    // ------------------------------------------------------------------
    // Debounce cycle
    // ------------------------------------------------------------------

    /// Show the original crop now and schedule one preview update after the
    /// debounce delay, replacing any update already scheduled.
    fn on_preview_parameters_changed(&mut self) {
        self.emit(PreviewSignal::VisibleRectChanging);
        self.abort_update_timer();
        self.display_original_image();
        let now = self.clock.now();
        self.update_timer = Some(self.timers.start(now, self.debounce_delay));
        self.saved_preview_valid = false;
        self.supersede_requests();
    }

    /// Cancel the scheduled preview update, if any.
    pub fn abort_update_timer(&mut self) {
        if let Some(id) = self.update_timer.take() {
            self.timers.kill(id);
        }
    }

    /// Fire due timers. Returns true if a preview update was requested.
    pub fn poll_timers(&mut self) -> bool {
        let now = self.clock.now();
        let mut requested = false;
        for id in self.timers.expired(now) {
            if self.update_timer == Some(id) {
                self.update_timer = None;
                self.send_update_request();
                requested = true;
            }
        }
        requested
    }

    /// When the host should call [`Self::poll_timers`] next.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Results for requests issued before this point are no longer wanted.
    fn supersede_requests(&mut self) {
        self.generation += 1;
    }

    pub fn send_update_request(&mut self) {
        self.invalidate_saved_preview();
        self.request_update();
    }

    fn request_update(&mut self) {
        self.supersede_requests();
        let request = self.current_request();
        debug!(request = request.0, rect = ?self.visible_rect, zoom = self.zoom, "preview update requested");
        self.emit(PreviewSignal::PreviewUpdateRequested(request));
    }

    pub fn invalidate_saved_preview(&mut self) {
        self.saved_preview_valid = false;
    }

    // ------------------------------------------------------------------
    // Renderer results
    // ------------------------------------------------------------------

    /// Deliver a rendered preview. Stale results are dropped and false is returned.
    pub fn set_preview_image(&mut self, request: RequestId, image: RgbaImage) -> bool {
        if request != self.current_request() {
            debug!(
                request = request.0,
                current = self.generation,
                "discarding superseded preview"
            );
            return false;
        }
        self.error_message = None;
        self.saved_preview = Some(image);
        self.saved_preview_valid = true;
        self.update_original_image_position();
        self.state = PreviewState::ShowingPreview;
        if self.is_at_full_zoom() {
            if let Some(fit) = self.fit_zoom() {
                self.zoom = fit;
                self.emit_zoom_changed();
            }
        }
        self.request_repaint();
        true
    }

    /// Deliver a render failure, shown as an overlay over the last image.
    pub fn set_preview_error(&mut self, request: RequestId, message: impl Into<String>) -> bool {
        if request != self.current_request() {
            debug!(request = request.0, "discarding superseded preview error");
            return false;
        }
        self.error_message = Some(message.into());
        self.state = PreviewState::ShowingPreview;
        self.request_repaint();
        true
    }

    // ------------------------------------------------------------------
    // Preview toggling
    // ------------------------------------------------------------------

    pub fn display_original_image(&mut self) {
        self.state = PreviewState::ShowingOriginal;
        self.request_repaint();
    }

    fn restore_preview(&mut self) {
        self.state = PreviewState::ShowingPreview;
        self.request_repaint();
    }

    /// The user switched the preview on or off.
    pub fn on_preview_toggled(&mut self, on: bool) {
        self.preview_enabled = on;
        if !on {
            self.display_original_image();
        } else if self.saved_preview_valid {
            self.restore_preview();
        } else {
            self.request_update();
        }
    }

    /// Change the enabled flag without touching what is displayed.
    pub fn set_preview_enabled(&mut self, on: bool) {
        self.preview_enabled = on;
    }

    pub fn enable_right_click(&mut self) {
        self.right_click_enabled = true;
    }

    pub fn disable_right_click(&mut self) {
        self.right_click_enabled = false;
    }
}
