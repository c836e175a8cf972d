mod common;

use std::time::Duration;

use approx::assert_abs_diff_eq;
use common::{controller, settle, update_requests, zoom_signals};
use filterview_core::geometry::{NormalizedRect, PixelPoint, PixelSize};
use filterview_core::preview::{PointerButton, PreviewEvent, PreviewSignal, PreviewState};
use image::{Rgba, RgbaImage};

fn wheel(x: i32, y: i32, angle_delta_y: i32) -> PreviewEvent {
    PreviewEvent::Wheel {
        position: PixelPoint::new(x, y),
        angle_delta_y,
    }
}

fn press(button: PointerButton, x: i32, y: i32) -> PreviewEvent {
    PreviewEvent::Press {
        button,
        position: PixelPoint::new(x, y),
    }
}

fn release(button: PointerButton, x: i32, y: i32) -> PreviewEvent {
    PreviewEvent::Release {
        button,
        position: PixelPoint::new(x, y),
    }
}

fn drag_to(x: i32, y: i32) -> PreviewEvent {
    PreviewEvent::Move {
        left_held: true,
        position: PixelPoint::new(x, y),
    }
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

#[test]
fn test_wheel_notch_is_one_zoom_step() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    c.display_frame();
    assert!(c.handle_event(wheel(400, 300, 120)));
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.6, epsilon = 1e-12);

    assert!(c.handle_event(wheel(400, 300, 240)));
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.864, epsilon = 1e-12);

    assert!(c.handle_event(wheel(400, 300, -120)));
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.72, epsilon = 1e-12);
}

#[test]
fn test_partial_wheel_notch_is_ignored() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    c.display_frame();
    c.handle_event(wheel(400, 300, 60));
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.5, epsilon = 1e-12);
    assert!(zoom_signals(&c.take_signals()).is_empty());
}

#[test]
fn test_wheel_anchor_is_relative_to_displayed_image() {
    // image letterboxed 100 px below the widget top
    let (mut c, _) = controller(1600, 1200, 800, 800);
    c.display_frame();
    assert_eq!(c.image_position().top_left(), PixelPoint::new(0, 100));

    // the image's bottom-right corner stays put
    c.handle_event(wheel(799, 699, 120 * 3));
    let rect = c.visible_rect();
    assert_abs_diff_eq!(rect.x + rect.w, 1.0, epsilon = 2e-3);
    assert_abs_diff_eq!(rect.y + rect.h, 1.0, epsilon = 2e-3);
}

// ---------------------------------------------------------------------------
// Drag to pan
// ---------------------------------------------------------------------------

#[test]
fn test_drag_pans_and_requests_on_release() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    c.set_zoom_level(1.0);
    c.display_frame();
    let start = c.visible_rect();
    assert!(c.is_update_timer_armed());
    c.take_signals();

    assert!(c.handle_event(press(PointerButton::Left, 400, 300)));
    // pressing inside the image cancels the pending update
    assert!(!c.is_update_timer_armed());

    let request_before = c.current_request();
    assert!(c.handle_event(drag_to(300, 250)));
    let rect = c.visible_rect();
    assert_abs_diff_eq!(rect.x - start.x, 100.0 / 1600.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.y - start.y, 50.0 / 1200.0, epsilon = 1e-12);
    assert_eq!(c.state(), PreviewState::ShowingOriginal);
    assert!(c.current_request() > request_before);

    let signals = c.take_signals();
    assert!(signals.contains(&PreviewSignal::VisibleRectChanging));
    assert!(update_requests(&signals).is_empty());

    assert!(c.handle_event(release(PointerButton::Left, 300, 250)));
    let requests = update_requests(&c.take_signals());
    assert_eq!(requests, vec![c.current_request()]);
    assert_eq!(c.saved_center(), c.visible_rect().center());
}

#[test]
fn test_drag_stops_at_image_edge() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    c.set_zoom_level(1.0);
    c.display_frame();
    c.handle_event(press(PointerButton::Left, 10, 10));
    c.handle_event(drag_to(799, 599));
    let rect = c.visible_rect();
    assert_eq!(rect.x, 0.0);
    assert_eq!(rect.y, 0.0);
    c.handle_event(release(PointerButton::Left, 799, 599));
    assert!(rect.is_inside_image());
}

#[test]
fn test_drag_at_full_zoom_does_nothing() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    c.display_frame();
    c.handle_event(press(PointerButton::Left, 400, 300));
    c.handle_event(drag_to(100, 100));
    c.handle_event(release(PointerButton::Left, 100, 100));
    assert_eq!(c.visible_rect(), NormalizedRect::FULL);
    assert!(update_requests(&c.take_signals()).is_empty());
}

#[test]
fn test_click_at_full_zoom_keeps_pending_update() {
    let (mut c, clock) = controller(1600, 1200, 800, 600);
    c.zoom_in(PixelPoint::new(400, 300), 1);
    settle(&mut c, &clock);
    c.zoom_full_image();
    c.take_signals();
    assert!(c.is_update_timer_armed());

    c.display_frame();
    c.handle_event(press(PointerButton::Left, 400, 300));
    c.handle_event(release(PointerButton::Left, 400, 300));
    assert!(c.is_update_timer_armed());

    clock.advance(Duration::from_secs(1));
    c.poll_timers();
    assert_eq!(update_requests(&c.take_signals()), vec![c.current_request()]);
}

#[test]
fn test_press_outside_image_does_not_start_drag() {
    // zoomed in horizontally only: the image is letterboxed 40 px from the top
    let (mut c, _) = controller(1600, 1200, 800, 800);
    c.set_zoom_level(0.6);
    c.display_frame();
    assert_eq!(c.image_position().y, 40);
    let start = c.visible_rect();
    assert!(!c.is_at_full_zoom());
    c.handle_event(press(PointerButton::Left, 10, 20));
    c.handle_event(drag_to(200, 300));
    c.handle_event(release(PointerButton::Left, 200, 300));
    assert_eq!(c.visible_rect(), start);
}

#[test]
fn test_move_without_button_is_not_consumed() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    let consumed = c.handle_event(PreviewEvent::Move {
        left_held: false,
        position: PixelPoint::new(5, 5),
    });
    assert!(!consumed);
}

// ---------------------------------------------------------------------------
// Right-click peek
// ---------------------------------------------------------------------------

fn with_preview() -> filterview_core::preview::PreviewController<common::FakeSource> {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    let request = c.current_request();
    c.set_preview_image(request, RgbaImage::from_pixel(800, 600, Rgba([0, 0, 0, 255])));
    c
}

#[test]
fn test_right_button_peeks_at_original() {
    let mut c = with_preview();
    assert!(c.handle_event(press(PointerButton::Right, 100, 100)));
    assert_eq!(c.state(), PreviewState::ShowingOriginal);
    assert!(c.handle_event(release(PointerButton::Right, 100, 100)));
    assert_eq!(c.state(), PreviewState::ShowingPreview);
}

#[test]
fn test_right_release_without_valid_preview_keeps_original() {
    let mut c = with_preview();
    c.handle_event(press(PointerButton::Right, 100, 100));
    c.invalidate_saved_preview();
    c.handle_event(release(PointerButton::Right, 100, 100));
    assert_eq!(c.state(), PreviewState::ShowingOriginal);
}

#[test]
fn test_right_click_disabled() {
    let mut c = with_preview();
    c.disable_right_click();
    assert!(!c.handle_event(press(PointerButton::Right, 100, 100)));
    assert_eq!(c.state(), PreviewState::ShowingPreview);

    c.enable_right_click();
    assert!(c.handle_event(press(PointerButton::Right, 100, 100)));
    assert_eq!(c.state(), PreviewState::ShowingOriginal);
}

#[test]
fn test_right_click_with_preview_disabled_changes_nothing() {
    let mut c = with_preview();
    c.on_preview_toggled(false);
    c.handle_event(press(PointerButton::Right, 100, 100));
    c.handle_event(release(PointerButton::Right, 100, 100));
    assert_eq!(c.state(), PreviewState::ShowingOriginal);
}

#[test]
fn test_middle_button_is_ignored() {
    let mut c = with_preview();
    assert!(!c.handle_event(press(PointerButton::Middle, 100, 100)));
    assert_eq!(c.state(), PreviewState::ShowingPreview);
}

// ---------------------------------------------------------------------------
// Window events
// ---------------------------------------------------------------------------

#[test]
fn test_resize_event_reaches_controller() {
    let (mut c, _) = controller(1600, 1200, 800, 600);
    assert!(c.handle_event(PreviewEvent::Resized(PixelSize::new(400, 300))));
    assert_eq!(c.widget_size(), PixelSize::new(400, 300));
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.25, epsilon = 1e-12);
}
