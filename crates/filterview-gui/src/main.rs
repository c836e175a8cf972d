mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use anyhow::Context;
use filterview_core::config::PreviewConfig;

/// Config file read at startup when `FILTERVIEW_CONFIG` points to one.
const CONFIG_ENV: &str = "FILTERVIEW_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config();
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("filterview"),
        ..Default::default()
    };

    eframe::run_native(
        "filterview",
        options,
        Box::new(|cc| Ok(Box::new(app::FilterviewApp::new(&cc.egui_ctx, config, initial)))),
    )
}

fn load_config() -> PreviewConfig {
    match read_config_from_env() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("using default config: {e:#}");
            PreviewConfig::default()
        }
    }
}

fn read_config_from_env() -> anyhow::Result<Option<PreviewConfig>> {
    let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        return Ok(None);
    };
    let config = PreviewConfig::load(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(Some(config))
}
