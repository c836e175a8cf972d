use filterview_core::geometry::{PixelPoint, PixelRect, PixelSize};
use filterview_core::preview::{PointerButton, PreviewEvent, PreviewState};

use crate::app::FilterviewApp;
use crate::convert::rgba_to_color_image;
use crate::states::{TextureKey, ViewportState};

/// Scroll distance egui reports for one wheel notch.
const POINTS_PER_WHEEL_NOTCH: f32 = 40.0;
/// Wheel angle of one notch, in eighths of a degree.
const EIGHTHS_PER_NOTCH: i32 = 120;

pub fn show(ctx: &egui::Context, app: &mut FilterviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let FilterviewApp {
            controller,
            viewport,
            ..
        } = app;

        // tracked before an image is open so the first controller starts at the right size
        let ppp = ctx.pixels_per_point();
        let widget_size = PixelSize::new(
            (rect.width() * ppp).round() as u32,
            (rect.height() * ppp).round() as u32,
        );
        let resized = widget_size != viewport.widget_size;
        viewport.widget_size = widget_size;

        let Some(controller) = controller.as_mut() else {
            show_placeholder(ui);
            return;
        };

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let mut events = Vec::new();
        if resized {
            events.push(PreviewEvent::Resized(widget_size));
        }

        collect_window_events(ctx, viewport, &mut events);
        collect_pointer_events(ui, &response, rect, ppp, viewport, &mut events);

        for event in events {
            controller.handle_event(event);
        }
        if response.double_clicked() {
            controller.zoom_full_image();
        }

        let request = controller.current_request().0;
        let visible = controller.visible_rect();
        let frame = controller.display_frame();
        let Some(image) = frame.image else {
            return;
        };
        let key = TextureKey {
            state: frame.state,
            request,
            rect: visible,
            size: PixelSize::new(image.width(), image.height()),
        };
        if viewport.texture.is_none() || viewport.texture_key != Some(key) {
            viewport.texture = Some(ctx.load_texture(
                "preview",
                rgba_to_color_image(image),
                egui::TextureOptions::LINEAR,
            ));
            viewport.texture_key = Some(key);
        }

        let target = to_screen_rect(frame.target, rect, ppp);
        if let Some(texture) = &viewport.texture {
            draw_image(ui, texture.id(), target);
        }
        if let Some(message) = frame.overlay {
            draw_error_overlay(ui, target, message);
        }
        draw_zoom_label(ui, rect, &viewport.zoom_label, frame.state);
    });
}

fn collect_window_events(
    ctx: &egui::Context,
    viewport: &mut ViewportState,
    events: &mut Vec<PreviewEvent>,
) {
    let (focused, minimized, released) = ctx.input(|i| {
        (
            i.viewport().focused.unwrap_or(true),
            i.viewport().minimized.unwrap_or(false),
            i.pointer.any_released(),
        )
    });
    if focused && !viewport.focused {
        events.push(PreviewEvent::WindowActivated);
    }
    viewport.focused = focused;
    if minimized != viewport.minimized {
        events.push(PreviewEvent::VisibilityChanged(!minimized));
        viewport.minimized = minimized;
    }
    if released {
        events.push(PreviewEvent::WindowMouseReleased);
    }
}

fn collect_pointer_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    ppp: f32,
    viewport: &mut ViewportState,
    events: &mut Vec<PreviewEvent>,
) {
    let hovered = response.hovered();
    ui.input(|i| {
        let Some(pos) = i.pointer.latest_pos() else {
            return;
        };
        let position = to_widget_point(pos, rect, ppp);

        if hovered {
            viewport.scroll_accum += i.raw_scroll_delta.y;
            let notches = (viewport.scroll_accum / POINTS_PER_WHEEL_NOTCH).trunc();
            if notches != 0.0 {
                viewport.scroll_accum -= notches * POINTS_PER_WHEEL_NOTCH;
                events.push(PreviewEvent::Wheel {
                    position,
                    angle_delta_y: notches as i32 * EIGHTHS_PER_NOTCH,
                });
            }
        } else {
            viewport.scroll_accum = 0.0;
        }

        for (egui_button, button) in [
            (egui::PointerButton::Primary, PointerButton::Left),
            (egui::PointerButton::Secondary, PointerButton::Right),
            (egui::PointerButton::Middle, PointerButton::Middle),
        ] {
            if hovered && i.pointer.button_pressed(egui_button) {
                events.push(PreviewEvent::Press { button, position });
            }
        }

        if i.pointer.delta() != egui::Vec2::ZERO && (hovered || i.pointer.primary_down()) {
            events.push(PreviewEvent::Move {
                left_held: i.pointer.primary_down(),
                position,
            });
        }

        for (egui_button, button) in [
            (egui::PointerButton::Primary, PointerButton::Left),
            (egui::PointerButton::Secondary, PointerButton::Right),
            (egui::PointerButton::Middle, PointerButton::Middle),
        ] {
            if i.pointer.button_released(egui_button) {
                events.push(PreviewEvent::Release { button, position });
            }
        }
    });
}

fn to_widget_point(pos: egui::Pos2, rect: egui::Rect, ppp: f32) -> PixelPoint {
    let rel = (pos - rect.min) * ppp;
    PixelPoint::new(rel.x.round() as i32, rel.y.round() as i32)
}

fn to_screen_rect(target: PixelRect, rect: egui::Rect, ppp: f32) -> egui::Rect {
    let min = rect.min + egui::vec2(target.x as f32, target.y as f32) / ppp;
    let size = egui::vec2(target.width as f32, target.height as f32) / ppp;
    egui::Rect::from_min_size(min, size)
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_error_overlay(ui: &egui::Ui, target: egui::Rect, message: &str) {
    let painter = ui.painter();
    painter.rect_filled(target, 0.0, egui::Color32::from_black_alpha(160));
    painter.text(
        target.center(),
        egui::Align2::CENTER_CENTER,
        message,
        egui::FontId::proportional(16.0),
        egui::Color32::from_rgb(255, 120, 120),
    );
}

fn draw_zoom_label(ui: &egui::Ui, rect: egui::Rect, label: &str, state: PreviewState) {
    let text = match state {
        PreviewState::ShowingOriginal => format!("{label} (original)"),
        PreviewState::ShowingPreview => label.to_string(),
    };
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        text,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
