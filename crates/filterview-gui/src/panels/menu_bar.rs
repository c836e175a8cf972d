use filterview_core::config::PreviewConfig;

use crate::app::FilterviewApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut FilterviewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let can_save = app.controller.is_some();
                if ui.add_enabled(can_save, egui::Button::new("Save Preview As...").shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    save_preview(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let Some(c) = app.controller.as_mut() else {
                    ui.label("No image");
                    return;
                };
                if ui.button("Zoom In").clicked() {
                    c.zoom_in_center();
                }
                if ui.button("Zoom Out").clicked() {
                    c.zoom_out_center();
                }
                if ui.button("Fit Image").clicked() {
                    ui.close();
                    c.zoom_full_image();
                }
                if ui.button("Actual Size").clicked() {
                    ui.close();
                    c.set_zoom_level(1.0);
                }

                ui.separator();

                let mut enabled = c.is_preview_enabled();
                if ui.checkbox(&mut enabled, "Show Preview").changed() {
                    c.on_preview_toggled(enabled);
                }
                let mut peek = app.config.right_click_peek;
                if ui.checkbox(&mut peek, "Right-Click Shows Original").changed() {
                    app.config.right_click_peek = peek;
                    if peek {
                        c.enable_right_click();
                    } else {
                        c.disable_right_click();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_preview(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &mut FilterviewApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

/// Save what the viewport shows: the rendered preview when there is one,
/// otherwise the original crop.
fn save_preview(app: &mut FilterviewApp) {
    let Some(c) = app.controller.as_mut() else {
        return;
    };
    let preview = if c.is_saved_preview_valid() {
        c.saved_preview().cloned()
    } else {
        None
    };
    let Some(image) = preview.or_else(|| c.original_image_crop().cloned()) else {
        return;
    };

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("TIFF", &["tiff", "tif"])
            .set_file_name("preview.png")
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveImage { path, image });
        }
    });
}

fn import_config(app: &mut FilterviewApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match PreviewConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &mut FilterviewApp) {
    let content = match app.config.to_toml_string() {
        Ok(content) => content,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: cannot serialize config: {e}"));
            return;
        }
    };
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("filterview.toml")
            .save_file()
        {
            if let Err(e) = std::fs::write(&path, content) {
                let _ = result_tx.send(WorkerResult::Error {
                    message: format!("Failed to write {}: {e}", path.display()),
                });
            }
        }
    });
}
