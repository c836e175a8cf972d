use filterview_core::source::InputMode;

use crate::app::FilterviewApp;
use crate::messages::WorkerCommand;
use crate::panels::section_header;
use crate::states::{FilterChoice, PreviewFactorChoice};

const LEFT_PANEL_WIDTH: f32 = 280.0;

const INPUT_MODES: &[InputMode] = &[
    InputMode::NoInput,
    InputMode::Active,
    InputMode::All,
    InputMode::ActiveAndBelow,
    InputMode::ActiveAndAbove,
    InputMode::AllVisible,
    InputMode::AllInvisible,
];

pub fn show(ctx: &egui::Context, app: &mut FilterviewApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                filter_section(ui, app);
                ui.separator();
                preview_section(ui, app);
                ui.separator();
                faves_section(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &mut FilterviewApp) {
    section_header(ui, "File", None);
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
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

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }
    if let Some(c) = app.controller.as_ref() {
        ui.small(format!("{} ({})", c.full_image_size(), c.input_mode()));
    }
}

fn filter_section(ui: &mut egui::Ui, app: &mut FilterviewApp) {
    let status = app.ui_state.is_busy().then_some("rendering...");
    section_header(ui, "Filter", status);
    ui.add_space(4.0);

    let mut index = FilterChoice::ALL
        .iter()
        .position(|f| f.is_same_filter(&app.ui_state.filter))
        .unwrap_or(0);
    let mut changed = false;

    if egui::ComboBox::from_label("Filter")
        .selected_text(app.ui_state.filter.name())
        .show_index(ui, &mut index, FilterChoice::ALL.len(), |i| {
            FilterChoice::ALL[i].name().to_string()
        })
        .changed()
    {
        app.ui_state.filter = FilterChoice::ALL[index];
        changed = true;
    }

    match &mut app.ui_state.filter {
        FilterChoice::Invert | FilterChoice::Grayscale => {}
        FilterChoice::Blur { sigma } => {
            changed |= ui.add(egui::Slider::new(sigma, 0.1..=20.0).text("Sigma")).changed();
        }
        FilterChoice::Brighten { amount } => {
            changed |= ui.add(egui::Slider::new(amount, -100..=100).text("Amount")).changed();
        }
        FilterChoice::Contrast { amount } => {
            changed |= ui.add(egui::Slider::new(amount, -100.0..=100.0).text("Amount")).changed();
        }
        FilterChoice::Unsharpen { sigma, threshold } => {
            changed |= ui.add(egui::Slider::new(sigma, 0.1..=10.0).text("Sigma")).changed();
            changed |= ui.add(egui::Slider::new(threshold, 0..=64).text("Threshold")).changed();
        }
        FilterChoice::Hue { degrees } => {
            changed |= ui.add(egui::Slider::new(degrees, -180..=180).text("Degrees")).changed();
        }
    }

    if changed {
        app.on_filter_changed();
    }
}

fn preview_section(ui: &mut egui::Ui, app: &mut FilterviewApp) {
    section_header(ui, "Preview", None);
    ui.add_space(4.0);

    let mut factor = app.ui_state.preview_factor;
    egui::ComboBox::from_label("Zoom")
        .selected_text(factor.to_string())
        .show_ui(ui, |ui| {
            for choice in PreviewFactorChoice::ALL {
                ui.selectable_value(&mut factor, *choice, choice.to_string());
            }
        });
    if factor != app.ui_state.preview_factor {
        app.ui_state.preview_factor = factor;
        app.apply_preview_factor();
    }

    let Some(c) = app.controller.as_mut() else {
        return;
    };

    let mut mode = c.input_mode();
    egui::ComboBox::from_label("Input")
        .selected_text(mode.to_string())
        .show_ui(ui, |ui| {
            for m in INPUT_MODES {
                ui.selectable_value(&mut mode, *m, m.to_string());
            }
        });
    if mode != c.input_mode() {
        c.set_input_mode(mode);
        c.refresh_full_image_size();
        c.send_update_request();
    }

    ui.horizontal(|ui| {
        if ui.button("\u{2212}").clicked() {
            c.zoom_out_center();
        }
        ui.label(&app.viewport.zoom_label);
        if ui.button("+").clicked() {
            c.zoom_in_center();
        }
        if ui.button("Fit").clicked() {
            c.zoom_full_image();
        }
        if ui.button("1:1").clicked() {
            c.set_zoom_level(1.0);
        }
    });
}

fn faves_section(ui: &mut egui::Ui, app: &mut FilterviewApp) {
    let count = format!("{}", app.ui_state.faves.len());
    section_header(ui, "Favorites", Some(&count));
    ui.add_space(4.0);

    let mut apply = None;
    let mut remove = None;
    for fave in app.ui_state.faves.iter() {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(false, &fave.name)
                .on_hover_text(format!("{} {}", fave.command, fave.default_values.join(",")))
                .clicked()
            {
                apply = Some(fave.name.clone());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("\u{2715}").clicked() {
                    remove = Some(fave.name.clone());
                }
            });
        });
    }
    if let Some(name) = apply {
        app.apply_fave(&name);
    }
    if let Some(name) = remove {
        app.remove_fave(&name);
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.new_fave_name)
                .hint_text(app.ui_state.filter.name())
                .desired_width(LEFT_PANEL_WIDTH - 100.0),
        );
        if ui
            .add_enabled(app.ui_state.faves_paths.is_some(), egui::Button::new("Add"))
            .clicked()
        {
            app.add_current_fave();
        }
    });
}
