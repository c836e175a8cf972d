use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use filterview_core::config::{PreviewConfig, PreviewFactor};
use filterview_core::geometry::PixelSize;
use filterview_core::preview::PreviewController;
use filterview_core::source::{ImageSource, MemoryImageSource};

use super::parse_size;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Preview widget size
    #[arg(long, default_value = "800x600", value_parser = parse_size)]
    pub widget: PixelSize,
}

pub fn run(args: &InfoArgs, config: &PreviewConfig) -> Result<()> {
    let source = MemoryImageSource::open(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let extent = source.extent(config.input_mode);

    let mut controller = PreviewController::new(source, config);
    controller.resize(args.widget);
    controller.refresh_full_image_size();
    let fit = controller
        .fit_zoom()
        .with_context(|| format!("Input mode {} provides no image", config.input_mode))?;

    println!("File:          {}", args.file.display());
    println!("Dimensions:    {extent}");
    println!("Input mode:    {}", config.input_mode);
    println!("Widget:        {}", args.widget);
    println!("Fit zoom:      {:.4}", fit);
    println!("Max zoom:      {:.1}", config.max_zoom);

    println!("Default zoom per preview factor:");
    for factor in [
        PreviewFactor::FullImage,
        PreviewFactor::ActualSize,
        PreviewFactor::Factor(2.0),
        PreviewFactor::Factor(4.0),
    ] {
        controller.set_preview_factor(factor, true);
        let rect = controller.visible_rect();
        println!(
            "  {:<14} zoom {:>8.4}  visible {:.1}% x {:.1}%",
            factor.to_string(),
            controller.current_zoom_factor(),
            rect.w * 100.0,
            rect.h * 100.0
        );
    }

    Ok(())
}
