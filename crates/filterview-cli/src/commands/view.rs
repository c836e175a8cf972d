use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use filterview_core::config::{PreviewConfig, PreviewFactor};
use filterview_core::geometry::{PixelPoint, PixelSize};
use filterview_core::preview::{PointerButton, PreviewController, PreviewEvent, PreviewSignal};
use filterview_core::source::MemoryImageSource;

use super::parse_size;
use crate::summary::{print_view_summary, ViewSummary};

#[derive(Args)]
pub struct ViewArgs {
    /// Input image file
    pub file: PathBuf,

    /// Preview widget size
    #[arg(long, default_value = "800x600", value_parser = parse_size)]
    pub widget: PixelSize,

    /// Gesture to apply, in order. Repeatable.
    /// Forms: `in [X Y] [STEPS]`, `out [X Y] [STEPS]`, `zoom LEVEL`, `full`,
    /// `pan DX DY`, `wheel X Y DELTA`, `drag X0 Y0 X1 Y1`, `factor any|full|actual|N`,
    /// `resize WxH`
    #[arg(short, long = "gesture")]
    pub gestures: Vec<Gesture>,

    /// Layer name whose `pos(x,y)` tag should be shown in preview coordinates. Repeatable.
    #[arg(long = "layer-name")]
    pub layer_names: Vec<String>,

    /// Save the visible crop of the original image to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One scripted user action on the preview pane.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    ZoomIn(Option<PixelPoint>, u32),
    ZoomOut(Option<PixelPoint>, u32),
    Zoom(f64),
    Full,
    Pan(f64, f64),
    Wheel(PixelPoint, i32),
    Drag(PixelPoint, PixelPoint),
    Factor(PreviewFactor),
    Resize(PixelSize),
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let (verb, rest) = words
            .split_first()
            .ok_or_else(|| "empty gesture".to_string())?;
        let numbers = |n: usize| -> Result<Vec<f64>, String> {
            if rest.len() != n {
                return Err(format!("'{verb}' takes {n} numbers, got {}", rest.len()));
            }
            rest.iter()
                .map(|w| w.parse::<f64>().map_err(|e| format!("bad number '{w}': {e}")))
                .collect()
        };
        let point = |x: f64, y: f64| PixelPoint::new(x as i32, y as i32);

        match *verb {
            "in" | "out" => {
                let (at, steps) = match rest.len() {
                    0 => (None, 1),
                    1 => (None, numbers(1)?[0] as u32),
                    2 => {
                        let v = numbers(2)?;
                        (Some(point(v[0], v[1])), 1)
                    }
                    _ => {
                        let v = numbers(3)?;
                        (Some(point(v[0], v[1])), v[2] as u32)
                    }
                };
                Ok(if *verb == "in" {
                    Gesture::ZoomIn(at, steps)
                } else {
                    Gesture::ZoomOut(at, steps)
                })
            }
            "zoom" => Ok(Gesture::Zoom(numbers(1)?[0])),
            "full" => {
                numbers(0)?;
                Ok(Gesture::Full)
            }
            "pan" => {
                let v = numbers(2)?;
                Ok(Gesture::Pan(v[0], v[1]))
            }
            "wheel" => {
                let v = numbers(3)?;
                Ok(Gesture::Wheel(point(v[0], v[1]), v[2] as i32))
            }
            "drag" => {
                let v = numbers(4)?;
                Ok(Gesture::Drag(point(v[0], v[1]), point(v[2], v[3])))
            }
            "factor" => {
                let arg = rest.first().ok_or("'factor' needs an argument")?;
                let factor = match *arg {
                    "any" => PreviewFactor::Any,
                    "full" => PreviewFactor::FullImage,
                    "actual" => PreviewFactor::ActualSize,
                    n => PreviewFactor::from_f64(
                        n.parse().map_err(|e| format!("bad factor '{n}': {e}"))?,
                    ),
                };
                Ok(Gesture::Factor(factor))
            }
            "resize" => {
                let arg = rest.first().ok_or("'resize' needs WxH")?;
                Ok(Gesture::Resize(parse_size(arg)?))
            }
            other => Err(format!("unknown gesture '{other}'")),
        }
    }
}

fn apply(controller: &mut PreviewController<MemoryImageSource>, gesture: &Gesture) {
    match *gesture {
        Gesture::ZoomIn(Some(p), steps) => controller.zoom_in(p, steps),
        Gesture::ZoomIn(None, steps) => {
            for _ in 0..steps {
                controller.zoom_in_center();
            }
        }
        Gesture::ZoomOut(Some(p), steps) => controller.zoom_out(p, steps),
        Gesture::ZoomOut(None, steps) => {
            for _ in 0..steps {
                controller.zoom_out_center();
            }
        }
        Gesture::Zoom(level) => controller.set_zoom_level(level),
        Gesture::Full => controller.zoom_full_image(),
        Gesture::Pan(dx, dy) => {
            controller.translate_full_image(dx, dy);
        }
        Gesture::Wheel(position, angle_delta_y) => {
            controller.handle_event(PreviewEvent::Wheel {
                position,
                angle_delta_y,
            });
        }
        Gesture::Drag(from, to) => {
            controller.handle_event(PreviewEvent::Press {
                button: PointerButton::Left,
                position: from,
            });
            controller.handle_event(PreviewEvent::Move {
                left_held: true,
                position: to,
            });
            controller.handle_event(PreviewEvent::Release {
                button: PointerButton::Left,
                position: to,
            });
        }
        Gesture::Factor(factor) => controller.set_preview_factor(factor, false),
        Gesture::Resize(size) => {
            controller.handle_event(PreviewEvent::Resized(size));
        }
    }
}

pub fn run(args: &ViewArgs, config: &PreviewConfig) -> Result<()> {
    let source = MemoryImageSource::open(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut controller = PreviewController::new(source, config);
    controller.resize(args.widget);
    controller.refresh_full_image_size();
    controller.set_preview_factor(config.preview_factor, true);
    controller.display_frame();

    println!(
        "{:>3}  {:<22}  {:>8}  {:>28}",
        "#", "Gesture", "Zoom", "Visible rect (x, y, w, h)"
    );
    println!("{}", "-".repeat(68));

    let mut update_requests = 0;
    for (i, gesture) in args.gestures.iter().enumerate() {
        apply(&mut controller, gesture);
        // lay out as a repaint would, so pointer gestures see the new image position
        controller.display_frame();
        update_requests += controller
            .take_signals()
            .iter()
            .filter(|s| matches!(s, PreviewSignal::PreviewUpdateRequested(_)))
            .count();
        let rect = controller.visible_rect();
        println!(
            "{:>3}  {:<22}  {:>8.4}  ({:.3}, {:.3}, {:.3}, {:.3})",
            i + 1,
            format!("{gesture:?}"),
            controller.current_zoom_factor(),
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );
    }

    // the session is over: flush the debounce instead of waiting for it
    if controller.is_update_timer_armed() {
        controller.abort_update_timer();
        controller.send_update_request();
        update_requests += 1;
    }

    let mut names = args.layer_names.clone();
    controller.rescale_position_names(&mut names, config.input_mode);

    let crop_size = controller.original_image_crop_size();
    if let Some(ref path) = args.output {
        let crop = controller
            .original_image_crop()
            .context("No crop available for the visible rect")?;
        crop.save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    print_view_summary(&ViewSummary {
        input: &args.file,
        widget: controller.widget_size(),
        full_image: controller.full_image_size(),
        zoom: controller.current_zoom_factor(),
        rect: controller.visible_rect(),
        crop: crop_size,
        update_requests,
        last_request: controller.current_request().0,
        layer_names: args.layer_names.iter().zip(names.iter()).collect(),
        output: args.output.as_deref(),
    });

    Ok(())
}
