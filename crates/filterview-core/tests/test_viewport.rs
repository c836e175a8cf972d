mod common;

use approx::assert_abs_diff_eq;
use common::{assert_rect_inside, controller, settle, zoom_signals};
use filterview_core::config::PreviewFactor;
use filterview_core::consts::PREVIEW_MAX_ZOOM_FACTOR;
use filterview_core::geometry::{NormalizedRect, PixelPoint, PixelSize};

/// Normalized image coordinate under a pixel of the displayed image.
fn image_coord(
    c: &filterview_core::preview::PreviewController<common::FakeSource>,
    p: PixelPoint,
) -> (f64, f64) {
    let rect = c.visible_rect();
    let full = c.full_image_size();
    let z = c.current_zoom_factor();
    (
        p.x as f64 / (z * full.width as f64) + rect.x,
        p.y as f64 / (z * full.height as f64) + rect.y,
    )
}

// ---------------------------------------------------------------------------
// Fit and preview factors
// ---------------------------------------------------------------------------

#[test]
fn test_default_fit_zoom_is_full_image() {
    let (c, _) = controller(4000, 3000, 800, 600);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
    assert_eq!(c.visible_rect(), NormalizedRect::FULL);
    assert!(c.is_at_full_zoom());
}

#[test]
fn test_actual_size_factor_shrinks_rect() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_preview_factor(PreviewFactor::ActualSize, true);
    let rect = c.visible_rect();
    assert_eq!(c.current_zoom_factor(), 1.0);
    assert_abs_diff_eq!(rect.w, 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.h, 0.2, epsilon = 1e-12);
    // reset centers the rect
    assert_abs_diff_eq!(rect.x, 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.y, 0.4, epsilon = 1e-12);
    assert_eq!(zoom_signals(&c.take_signals()), vec![1.0]);
}

#[test]
fn test_factor_multiplies_fit_ratio() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_preview_factor(PreviewFactor::Factor(2.0), true);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(c.visible_rect().w, 0.5, epsilon = 1e-12);
    assert!(c.is_at_default_zoom());
}

#[test]
fn test_any_factor_without_reset_restores_saved_center() {
    let (mut c, clock) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    c.translate_full_image(1000.0, -200.0);
    settle(&mut c, &clock);
    let center = c.saved_center();

    c.set_preview_factor(PreviewFactor::Any, false);
    assert_eq!(c.current_zoom_factor(), 1.0);
    assert_abs_diff_eq!(c.visible_rect().center().x, center.x, epsilon = 1e-12);
    assert_abs_diff_eq!(c.visible_rect().center().y, center.y, epsilon = 1e-12);

    c.set_preview_factor(PreviewFactor::Any, true);
    assert!(c.is_at_full_zoom());
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_full_image_factor_is_default_zoom() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_preview_factor(PreviewFactor::FullImage, false);
    assert!(c.is_at_full_zoom());
    assert_abs_diff_eq!(c.default_zoom_factor(), 0.2, epsilon = 1e-12);
    assert!(c.is_at_default_zoom());
    c.set_zoom_level(1.0);
    assert!(!c.is_at_default_zoom());
}

// ---------------------------------------------------------------------------
// Zoom gestures
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_in_preserves_anchor() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    let p = PixelPoint::new(200, 150);
    let before = image_coord(&c, p);
    c.zoom_in(p, 3);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2 * 1.2f64.powi(3), epsilon = 1e-12);
    let after = image_coord(&c, p);
    assert_abs_diff_eq!(before.0, after.0, epsilon = 1e-9);
    assert_abs_diff_eq!(before.1, after.1, epsilon = 1e-9);
    assert_rect_inside(&c.visible_rect());
}

#[test]
fn test_zoom_in_twice_at_different_anchors() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(400, 300), 2);
    let p = PixelPoint::new(500, 250);
    let before = image_coord(&c, p);
    c.zoom_in(p, 1);
    let after = image_coord(&c, p);
    assert_abs_diff_eq!(before.0, after.0, epsilon = 1e-9);
    assert_abs_diff_eq!(before.1, after.1, epsilon = 1e-9);
}

#[test]
fn test_zoom_in_emits_change_signals() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(400, 300), 1);
    let signals = c.take_signals();
    let zooms = zoom_signals(&signals);
    assert_eq!(zooms.len(), 1);
    assert_abs_diff_eq!(zooms[0], 0.24, epsilon = 1e-12);
    assert!(c.is_update_timer_armed());
}

#[test]
fn test_zoom_in_clamps_to_max() {
    let (mut c, _) = controller(400, 300, 800, 600);
    c.zoom_in(PixelPoint::new(0, 0), 100);
    assert_eq!(c.current_zoom_factor(), PREVIEW_MAX_ZOOM_FACTOR);
    assert_rect_inside(&c.visible_rect());
    c.take_signals();

    // already at max: no-op
    c.zoom_in(PixelPoint::new(0, 0), 1);
    assert!(c.take_signals().is_empty());
}

#[test]
fn test_zoom_with_zero_steps_is_noop() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(10, 10), 0);
    assert!(c.take_signals().is_empty());
    assert!(!c.is_update_timer_armed());
}

#[test]
fn test_zoom_out_stops_at_full_image() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(100, 100), 1);
    assert!(!c.is_at_full_zoom());
    c.zoom_out(PixelPoint::new(100, 100), 5);
    assert!(c.is_at_full_zoom());
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
    c.take_signals();

    c.zoom_out(PixelPoint::new(100, 100), 1);
    assert!(c.take_signals().is_empty());
}

#[test]
fn test_zoom_full_image_resets_rect() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(700, 500), 4);
    c.translate_normalized(-0.1, 0.05);
    c.zoom_full_image();
    assert!(c.is_at_full_zoom());
    assert_eq!(c.visible_rect(), NormalizedRect::FULL);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_zoom_full_image_letterboxes_wide_image() {
    let (mut c, _) = controller(4000, 1000, 800, 600);
    c.zoom_full_image();
    // min(800/4000, 600/1000)
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
    assert!(c.is_at_full_zoom());
}

// ---------------------------------------------------------------------------
// set_zoom_level
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_out_preserves_anchor_above_fit() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.zoom_in(PixelPoint::new(400, 300), 4);
    let p = PixelPoint::new(200, 150);
    let before = image_coord(&c, p);
    c.zoom_out(p, 1);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2 * 1.2f64.powi(3), epsilon = 1e-12);
    assert!(!c.is_at_full_zoom());
    let after = image_coord(&c, p);
    assert_abs_diff_eq!(before.0, after.0, epsilon = 1e-9);
    assert_abs_diff_eq!(before.1, after.1, epsilon = 1e-9);
    assert_rect_inside(&c.visible_rect());
}

#[test]
fn test_set_zoom_level_above_max_is_refused() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(PREVIEW_MAX_ZOOM_FACTOR * 2.0);
    let signals = c.take_signals();
    assert_eq!(zoom_signals(&signals), vec![c.current_zoom_factor()]);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
    assert_eq!(signals.len(), 1);
}

#[test]
fn test_set_zoom_level_below_full_image_is_refused() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(0.1);
    assert_eq!(zoom_signals(&c.take_signals()), vec![0.2]);
    assert!(c.is_at_full_zoom());
}

#[test]
fn test_set_zoom_level_same_value_is_silent() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    let z = c.current_zoom_factor();
    c.set_zoom_level(z);
    assert!(c.take_signals().is_empty());
}

#[test]
fn test_set_zoom_level_zooms_about_center() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    let rect = c.visible_rect();
    assert_abs_diff_eq!(rect.x, 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.y, 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.w, 0.2, epsilon = 1e-12);
}

#[test]
fn test_set_zoom_level_keeps_center_between_levels() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(0.5);
    assert!(c.translate_normalized(-0.1, 0.05));
    let center = PixelPoint::new(400, 300);
    let before = image_coord(&c, center);
    c.set_zoom_level(1.0);
    assert_abs_diff_eq!(c.current_zoom_factor(), 1.0, epsilon = 1e-12);
    let after = image_coord(&c, center);
    assert_abs_diff_eq!(before.0, after.0, epsilon = 1e-9);
    assert_abs_diff_eq!(before.1, after.1, epsilon = 1e-9);
    assert_abs_diff_eq!(c.visible_rect().x, 0.3, epsilon = 1e-9);
    assert_abs_diff_eq!(c.visible_rect().y, 0.45, epsilon = 1e-9);
    assert_rect_inside(&c.visible_rect());
}

#[test]
fn test_set_zoom_level_nan_is_refused() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(f64::NAN);
    assert_eq!(zoom_signals(&c.take_signals()), vec![0.2]);
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_set_zoom_level_below_fit_snaps_to_full() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    c.take_signals();
    c.set_zoom_level(0.05);
    assert!(c.is_at_full_zoom());
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.2, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

#[test]
fn test_translate_clamps_to_image() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    assert!(c.translate_normalized(5.0, -5.0));
    let rect = c.visible_rect();
    assert_abs_diff_eq!(rect.x, 0.8, epsilon = 1e-12);
    assert_eq!(rect.y, 0.0);
    assert_rect_inside(&rect);
    assert!(!c.translate_normalized(1.0, -1.0));
}

#[test]
fn test_translate_full_image_uses_pixels() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    let before = c.visible_rect();
    assert!(c.translate_full_image(400.0, 300.0));
    let after = c.visible_rect();
    assert_abs_diff_eq!(after.x - before.x, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(after.y - before.y, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(c.saved_center().x, after.center().x, epsilon = 1e-12);
}

#[test]
fn test_zero_translation_is_idempotent() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    c.take_signals();
    c.take_repaint();
    let rect = c.visible_rect();
    for _ in 0..3 {
        assert!(!c.translate_normalized(0.0, 0.0));
    }
    assert_eq!(c.visible_rect(), rect);
    assert!(c.take_signals().is_empty());
    assert!(!c.take_repaint());
}

#[test]
fn test_translate_at_full_zoom_does_not_move() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    assert!(!c.translate_full_image(100.0, 100.0));
    assert_eq!(c.visible_rect(), NormalizedRect::FULL);
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_at_full_zoom_refits() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.resize(PixelSize::new(400, 600));
    assert!(c.is_at_full_zoom());
    assert_abs_diff_eq!(c.current_zoom_factor(), 0.1, epsilon = 1e-12);
    assert_eq!(zoom_signals(&c.take_signals()).len(), 1);
}

#[test]
fn test_resize_when_zoomed_keeps_center() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    c.translate_full_image(-800.0, 0.0);
    let center = c.saved_center();
    c.resize(PixelSize::new(1200, 300));
    let rect = c.visible_rect();
    assert_abs_diff_eq!(rect.w, 0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.h, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.center().x, center.x, epsilon = 1e-12);
    assert_abs_diff_eq!(rect.center().y, center.y, epsilon = 1e-12);
    assert_eq!(c.current_zoom_factor(), 1.0);
}

#[test]
fn test_resize_to_zero_is_ignored() {
    let (mut c, _) = controller(4000, 3000, 800, 600);
    c.set_zoom_level(1.0);
    let rect = c.visible_rect();
    c.take_signals();
    c.resize(PixelSize::new(0, 600));
    assert_eq!(c.visible_rect(), rect);
    assert!(c.take_signals().is_empty());
    c.zoom_in(PixelPoint::new(0, 0), 1);
    assert_eq!(c.current_zoom_factor(), 1.0);
}

#[test]
fn test_rect_invariant_through_gesture_sequence() {
    let (mut c, _) = controller(3000, 2000, 640, 480);
    let anchors = [(0, 0), (639, 479), (320, 10), (5, 470), (600, 240)];
    for (i, &(x, y)) in anchors.iter().cycle().take(40).enumerate() {
        let p = PixelPoint::new(x, y);
        match i % 5 {
            0 => c.zoom_in(p, 2),
            1 => {
                c.translate_full_image(x as f64 * 3.0 - 900.0, y as f64 - 240.0);
            }
            2 => c.zoom_out(p, 1),
            3 => c.resize(PixelSize::new(640 + i as u32 * 7, 480 - i as u32 * 3)),
            _ => {
                c.translate_normalized(0.3, -0.2);
            }
        }
        assert_rect_inside(&c.visible_rect());
        assert!(c.current_zoom_factor() <= PREVIEW_MAX_ZOOM_FACTOR);
    }
}

#[test]
fn test_geometry_without_full_image_is_inert() {
    use filterview_core::config::PreviewConfig;
    use filterview_core::preview::PreviewController;

    let mut c = PreviewController::new(common::FakeSource::new(0, 0), &PreviewConfig::default());
    c.resize(PixelSize::new(800, 600));
    c.refresh_full_image_size();
    c.zoom_in(PixelPoint::new(10, 10), 2);
    c.zoom_full_image();
    assert!(!c.translate_full_image(10.0, 10.0));
    assert_eq!(c.visible_rect(), NormalizedRect::FULL);
    assert_eq!(c.current_zoom_factor(), 1.0);
}
