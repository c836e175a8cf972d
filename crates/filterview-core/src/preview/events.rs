use tracing::trace;

use super::{PreviewController, PreviewState};
use crate::consts::{WHEEL_DEGREES_PER_STEP, WHEEL_EIGHTHS_PER_DEGREE};
use crate::geometry::{PixelPoint, PixelSize};
use crate::source::ImageSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Input delivered by the host toolkit. Positions are widget pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreviewEvent {
    /// Vertical wheel rotation in eighths of a degree (positive away from the user).
    Wheel {
        position: PixelPoint,
        angle_delta_y: i32,
    },
    Press {
        button: PointerButton,
        position: PixelPoint,
    },
    Move {
        left_held: bool,
        position: PixelPoint,
    },
    Release {
        button: PointerButton,
        position: PixelPoint,
    },
    Resized(PixelSize),
    VisibilityChanged(bool),
    /// The top-level window gained focus.
    WindowActivated,
    /// A mouse button was released anywhere on the top-level window, including its frame.
    WindowMouseReleased,
}

impl<S: ImageSource> PreviewController<S> {
    /// Translate a host event into viewport gestures. Returns whether the
    /// event was consumed by the preview.
    pub fn handle_event(&mut self, event: PreviewEvent) -> bool {
        trace!(?event, "preview event");
        match event {
            PreviewEvent::Wheel {
                position,
                angle_delta_y,
            } => {
                self.on_wheel(position, angle_delta_y);
                true
            }
            PreviewEvent::Press { button, position } => self.on_press(button, position),
            PreviewEvent::Move {
                left_held,
                position,
            } => self.on_move(left_held, position),
            PreviewEvent::Release { button, position } => self.on_release(button, position),
            PreviewEvent::Resized(size) => {
                self.resize(size);
                true
            }
            PreviewEvent::VisibilityChanged(visible) => {
                self.set_visible(visible);
                false
            }
            PreviewEvent::WindowActivated | PreviewEvent::WindowMouseReleased => {
                self.flush_pending_resize();
                false
            }
        }
    }

    fn on_wheel(&mut self, position: PixelPoint, angle_delta_y: i32) {
        let degrees = angle_delta_y as f64 / WHEEL_EIGHTHS_PER_DEGREE;
        let steps = (degrees.abs() / WHEEL_DEGREES_PER_STEP) as u32;
        let anchor = position - self.image_position.top_left();
        if degrees > 0.0 {
            self.zoom_in(anchor, steps);
        } else {
            self.zoom_out(anchor, steps);
        }
    }

    fn on_press(&mut self, button: PointerButton, position: PixelPoint) -> bool {
        match button {
            PointerButton::Left => {
                if self.image_position.contains(position) {
                    self.drag_anchor = Some(position);
                    // a drag commits its own update on release
                    if !self.is_at_full_zoom() {
                        self.abort_update_timer();
                    }
                } else {
                    self.drag_anchor = None;
                }
                true
            }
            PointerButton::Right if self.right_click_enabled => {
                if self.preview_enabled {
                    self.display_original_image();
                }
                true
            }
            _ => false,
        }
    }

    fn on_move(&mut self, left_held: bool, position: PixelPoint) -> bool {
        if !left_held {
            return false;
        }
        if let Some(anchor) = self.drag_anchor {
            if !self.is_at_full_zoom() {
                let shift = anchor - position;
                if shift.manhattan_length() != 0 {
                    self.on_mouse_translation_in_image(shift);
                    self.drag_anchor = Some(position);
                }
            }
        }
        true
    }

    fn on_release(&mut self, button: PointerButton, position: PixelPoint) -> bool {
        match button {
            PointerButton::Left => {
                if let Some(anchor) = self.drag_anchor.take() {
                    if !self.is_at_full_zoom() {
                        self.on_mouse_translation_in_image(anchor - position);
                        self.send_update_request();
                    }
                }
                true
            }
            PointerButton::Right
                if self.right_click_enabled && self.state == PreviewState::ShowingOriginal =>
            {
                if self.preview_enabled {
                    if self.saved_preview_valid {
                        self.restore_preview();
                    } else {
                        self.display_original_image();
                    }
                }
                true
            }
            _ => false,
        }
    }
}
