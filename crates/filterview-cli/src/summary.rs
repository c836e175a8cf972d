use std::path::Path;

use console::Style;
use filterview_core::faves::{FavesModel, ResourcePaths};
use filterview_core::geometry::{NormalizedRect, PixelSize};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// End state of a `view` session.
pub struct ViewSummary<'a> {
    pub input: &'a Path,
    pub widget: PixelSize,
    pub full_image: PixelSize,
    pub zoom: f64,
    pub rect: NormalizedRect,
    pub crop: PixelSize,
    pub update_requests: usize,
    pub last_request: u64,
    /// Original and rescaled layer names.
    pub layer_names: Vec<(&'a String, &'a String)>,
    pub output: Option<&'a Path>,
}

pub fn print_view_summary(summary: &ViewSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Preview Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(summary.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.value.apply_to(summary.full_image)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Widget"),
        s.value.apply_to(summary.widget)
    );
    println!();

    println!("  {}", s.header.apply_to("Viewport"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.1}%", summary.zoom * 100.0))
    );
    let r = summary.rect;
    if r.is_full() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Visible"),
            s.method.apply_to("full image")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Visible"),
            s.value.apply_to(format!(
                "x {:.3}  y {:.3}  w {:.3}  h {:.3}",
                r.x, r.y, r.w, r.h
            ))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Crop"),
        s.value.apply_to(summary.crop)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Requests"),
        s.value.apply_to(format!(
            "{} (last #{})",
            summary.update_requests, summary.last_request
        ))
    );
    println!();

    if !summary.layer_names.is_empty() {
        println!("  {}", s.header.apply_to("Layer names"));
        for (original, rescaled) in &summary.layer_names {
            if original == rescaled {
                println!("    {}", s.disabled.apply_to(original));
            } else {
                println!(
                    "    {} {} {}",
                    s.label.apply_to(original),
                    s.label.apply_to("\u{2192}"),
                    s.value.apply_to(rescaled)
                );
            }
        }
        println!();
    }

    match summary.output {
        Some(path) => println!(
            "  {:<14}{}",
            s.label.apply_to("Saved"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Saved"),
            s.disabled.apply_to("no output requested")
        ),
    }
    println!();
}

pub fn print_faves(model: &FavesModel, paths: &ResourcePaths) {
    let s = Styles::new();

    println!();
    println!(
        "  {} {}",
        s.title.apply_to("Favorites"),
        s.path.apply_to(paths.faves_file().display())
    );
    println!();

    if model.is_empty() {
        println!("  {}", s.disabled.apply_to("none"));
        println!();
        return;
    }

    for (i, fave) in model.iter().enumerate() {
        println!(
            "  {}. {}",
            s.label.apply_to(i + 1),
            s.header.apply_to(&fave.name)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Filter"),
            s.value.apply_to(&fave.original_name)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Command"),
            s.method.apply_to(&fave.command)
        );
        if fave.preview_command != fave.command {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Preview"),
                s.method.apply_to(&fave.preview_command)
            );
        }
        if fave.default_values.is_empty() {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Parameters"),
                s.disabled.apply_to("defaults")
            );
        } else {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Parameters"),
                s.value.apply_to(fave.default_values.join(", "))
            );
        }
    }
    println!();
}
