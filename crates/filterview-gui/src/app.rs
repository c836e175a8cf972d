use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use filterview_core::config::PreviewConfig;
use filterview_core::faves::{read_faves, Fave, FavesWriter, ResourcePaths};
use filterview_core::geometry::PixelSize;
use filterview_core::preview::{PreviewController, PreviewSignal, RequestId};
use filterview_core::source::MemoryImageSource;
use tracing::{debug, trace, warn};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{FilterChoice, UIState, ViewportState};
use crate::worker;

pub struct FilterviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: PreviewConfig,
    /// Present once an image is loaded.
    pub controller: Option<PreviewController<MemoryImageSource>>,
    pub show_about: bool,
}

impl FilterviewApp {
    pub fn new(ctx: &egui::Context, config: PreviewConfig, initial: Option<PathBuf>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        let mut app = Self {
            cmd_tx,
            result_rx,
            result_tx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config,
            controller: None,
            show_about: false,
        };
        app.load_faves();
        if let Some(path) = initial {
            app.send_command(WorkerCommand::LoadImage { path });
        }
        app
    }

    fn load_faves(&mut self) {
        let paths = match ResourcePaths::resolve(self.config.faves_dir.as_deref()) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("favorites disabled: {e}");
                return;
            }
        };
        match read_faves(&paths) {
            Ok(model) => self.ui_state.faves = model,
            Err(e) => self.ui_state.add_log(format!("ERROR: cannot read favorites: {e}")),
        }
        self.ui_state.faves_paths = Some(paths);
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { path, image } => {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    ));
                    self.ui_state.file_path = Some(path);
                    self.install_source(MemoryImageSource::from_rgba(image));
                }
                WorkerResult::Preview {
                    request,
                    image,
                    elapsed,
                } => {
                    self.finish_render(request);
                    if let Some(c) = self.controller.as_mut() {
                        if c.set_preview_image(request, image) {
                            self.ui_state.last_render_ms = Some(elapsed.as_millis());
                            self.viewport.texture_key = None;
                        }
                    }
                }
                WorkerResult::RenderFailed { request, message } => {
                    self.finish_render(request);
                    if let Some(c) = self.controller.as_mut() {
                        if c.set_preview_error(request, &message) {
                            self.viewport.texture_key = None;
                            self.ui_state.add_log(format!("ERROR: {message}"));
                        }
                    }
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn finish_render(&mut self, request: RequestId) {
        if self.ui_state.rendering == Some(request.0) {
            self.ui_state.rendering = None;
        }
    }

    fn install_source(&mut self, source: MemoryImageSource) {
        let mut c = PreviewController::new(source, &self.config);
        if !self.viewport.widget_size.is_empty() {
            c.resize(self.viewport.widget_size);
        }
        c.refresh_full_image_size();
        c.set_preview_factor(self.ui_state.preview_factor.to_factor(), true);
        c.send_update_request();
        self.controller = Some(c);
        self.viewport.texture_key = None;
    }

    /// Replace the preview settings. An open image gets a fresh controller.
    pub fn apply_config(&mut self, config: PreviewConfig) {
        self.config = config;
        self.load_faves();
        if let Some(c) = self.controller.take() {
            let image = c.source().image().clone();
            self.install_source(MemoryImageSource::from_rgba(image));
        }
    }

    /// Fire debounce timers and act on the controller's signals.
    fn process_signals(&mut self, ctx: &egui::Context) {
        let Some(c) = self.controller.as_mut() else {
            return;
        };
        c.poll_timers();
        let signals = c.take_signals();
        if c.take_repaint() {
            ctx.request_repaint();
        }
        if let Some(deadline) = c.next_timer_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        for signal in signals {
            match signal {
                PreviewSignal::ZoomChanged(zoom) => {
                    self.viewport.zoom_label = format!("{:.0}%", zoom * 100.0);
                }
                PreviewSignal::PreviewUpdateRequested(request) => self.dispatch_render(request),
                PreviewSignal::VisibleRectChanging => trace!("visible rect changing"),
            }
        }
    }

    fn dispatch_render(&mut self, request: RequestId) {
        let Some(c) = self.controller.as_mut() else {
            return;
        };
        if !c.is_preview_enabled() {
            return;
        }
        let zoom = c.current_zoom_factor();
        let Some(crop) = c.original_image_crop().cloned() else {
            return;
        };
        let size = PixelSize::new(crop.width(), crop.height());
        // previews below 1:1 are rendered at screen resolution
        let target = if zoom < 1.0 { size.scaled_by(zoom) } else { size };
        debug!(request = request.0, %size, %target, "dispatching render");
        self.ui_state.rendering = Some(request.0);
        self.send_command(WorkerCommand::Render {
            request,
            crop,
            target,
            filter: self.ui_state.filter,
        });
    }

    pub fn set_filter(&mut self, filter: FilterChoice) {
        self.ui_state.filter = filter;
        self.on_filter_changed();
    }

    /// Filter or parameters changed: the current preview is out of date.
    pub fn on_filter_changed(&mut self) {
        if let Some(c) = self.controller.as_mut() {
            c.send_update_request();
        }
    }

    pub fn apply_preview_factor(&mut self) {
        let factor = self.ui_state.preview_factor.to_factor();
        if let Some(c) = self.controller.as_mut() {
            c.set_preview_factor(factor, false);
            c.send_update_request();
        }
    }

    pub fn add_current_fave(&mut self) {
        let filter = self.ui_state.filter;
        let name = match self.ui_state.new_fave_name.trim() {
            "" => filter.name().to_string(),
            name => name.to_string(),
        };
        let fave = Fave::new(name, filter.name(), filter.command(), filter.command())
            .with_default_values(filter.parameter_values());
        let used = self.ui_state.faves.add(fave);
        self.ui_state.new_fave_name.clear();
        self.ui_state.add_log(format!("Favorite added: {used}"));
        self.save_faves();
    }

    pub fn remove_fave(&mut self, name: &str) {
        if self.ui_state.faves.remove(name).is_some() {
            self.save_faves();
        }
    }

    pub fn apply_fave(&mut self, name: &str) {
        let Some(fave) = self.ui_state.faves.get(name) else {
            return;
        };
        match FilterChoice::from_command(&fave.command, &fave.default_values) {
            Some(filter) => self.set_filter(filter),
            None => {
                let message = format!("ERROR: unknown filter command '{}'", fave.command);
                self.ui_state.add_log(message);
            }
        }
    }

    fn save_faves(&mut self) {
        let Some(paths) = self.ui_state.faves_paths.as_ref() else {
            return;
        };
        // failures are logged by the writer; the previous file stays in place
        let result = FavesWriter::new(&self.ui_state.faves).write_faves(paths);
        if let Err(e) = result {
            self.ui_state.add_log(format!("ERROR: {e}"));
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FilterviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.process_signals(ctx);

        // About dialog
        if self.show_about {
            egui::Window::new("About filterview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("filterview");
                        ui.label("Interactive filter preview");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
