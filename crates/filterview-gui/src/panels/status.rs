use filterview_core::preview::PreviewState;

use crate::app::FilterviewApp;

pub fn show(ctx: &egui::Context, app: &mut FilterviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let Some(c) = app.controller.as_ref() else {
                ui.label("No image");
                return;
            };
            ui.label(c.full_image_size().to_string());
            ui.separator();
            ui.label(format!("Zoom: {}", app.viewport.zoom_label));
            ui.separator();
            ui.label(match c.state() {
                PreviewState::ShowingOriginal => "Original",
                PreviewState::ShowingPreview => "Preview",
            });
            ui.separator();
            ui.label(format!("Request #{}", c.current_request().0));
            if app.ui_state.is_busy() {
                ui.separator();
                ui.spinner();
            } else if let Some(ms) = app.ui_state.last_render_ms {
                ui.separator();
                ui.label(format!("Rendered in {ms} ms"));
            }
        });

        ui.add_space(2.0);
    });
}
