use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use filterview_core::geometry::PixelSize;
use filterview_core::preview::RequestId;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, info};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::states::FilterChoice;

pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("filterview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let cmd = match cmd {
            WorkerCommand::Render { .. } => newest_render(cmd, &cmd_rx, &tx, &ctx),
            other => other,
        };
        handle(cmd, &tx, &ctx);
    }
    debug!("worker channel closed");
}

/// Skip renders that were queued behind newer ones; only the newest request
/// can still be displayed. Other commands found on the way run immediately.
fn newest_render(
    mut render: WorkerCommand,
    cmd_rx: &mpsc::Receiver<WorkerCommand>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> WorkerCommand {
    while let Ok(next) = cmd_rx.try_recv() {
        match next {
            WorkerCommand::Render { .. } => {
                if let WorkerCommand::Render { request, .. } = &render {
                    debug!(request = request.0, "skipping superseded render");
                }
                render = next;
            }
            other => handle(other, tx, ctx),
        }
    }
    render
}

fn handle(cmd: WorkerCommand, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match cmd {
        WorkerCommand::LoadImage { path } => handle_load_image(&path, tx, ctx),
        WorkerCommand::Render {
            request,
            crop,
            target,
            filter,
        } => handle_render(request, &crop, target, filter, tx, ctx),
        WorkerCommand::SaveImage { path, image } => match image.save(&path) {
            Ok(()) => send(tx, ctx, WorkerResult::ImageSaved { path }),
            Err(e) => send_error(tx, ctx, format!("Save failed: {e}")),
        },
    }
}

fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match image::open(path) {
        Ok(img) => {
            info!(path = %path.display(), width = img.width(), height = img.height(), "image loaded");
            send(
                tx,
                ctx,
                WorkerResult::ImageLoaded {
                    path: path.to_path_buf(),
                    image: img.into_rgba8(),
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

fn handle_render(
    request: RequestId,
    crop: &RgbaImage,
    target: PixelSize,
    filter: FilterChoice,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = match render_preview(crop, target, filter) {
        Ok(image) => WorkerResult::Preview {
            request,
            image,
            elapsed: start.elapsed(),
        },
        Err(message) => WorkerResult::RenderFailed { request, message },
    };
    send(tx, ctx, result);
}

/// Scale the crop to the preview size and apply the filter.
///
/// Spatial parameters are scaled with the crop so a downscaled preview looks
/// like the full-resolution result.
pub fn render_preview(
    crop: &RgbaImage,
    target: PixelSize,
    filter: FilterChoice,
) -> Result<RgbaImage, String> {
    if target.is_empty() || crop.width() == 0 || crop.height() == 0 {
        return Err(format!("Cannot render an empty preview ({target})"));
    }
    let scale = target.width as f32 / crop.width() as f32;
    let mut img = if (crop.width(), crop.height()) == (target.width, target.height) {
        crop.clone()
    } else {
        imageops::resize(crop, target.width, target.height, FilterType::Triangle)
    };

    let out = match filter {
        FilterChoice::Invert => {
            imageops::invert(&mut img);
            img
        }
        FilterChoice::Grayscale => DynamicImage::ImageRgba8(img).grayscale().into_rgba8(),
        FilterChoice::Blur { sigma } => {
            if sigma <= 0.0 {
                return Err(format!("Blur sigma must be positive, got {sigma}"));
            }
            imageops::blur(&img, sigma * scale)
        }
        FilterChoice::Brighten { amount } => imageops::brighten(&img, amount),
        FilterChoice::Contrast { amount } => imageops::contrast(&img, amount),
        FilterChoice::Unsharpen { sigma, threshold } => {
            if sigma <= 0.0 {
                return Err(format!("Unsharp sigma must be positive, got {sigma}"));
            }
            imageops::unsharpen(&img, sigma * scale, threshold)
        }
        FilterChoice::Hue { degrees } => imageops::huerotate(&img, degrees),
    };
    Ok(out)
}
