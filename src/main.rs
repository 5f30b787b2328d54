mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use netgraph_view::config::ViewConfig;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph dataset JSON. The built-in sample network is shown when omitted.
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// View configuration JSON; individual flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    min_scale: Option<f64>,
    #[arg(long)]
    max_scale: Option<f64>,
    #[arg(long)]
    zoom_step: Option<f64>,
    #[arg(long)]
    label_threshold: Option<f64>,
    #[arg(long)]
    drag_threshold: Option<f64>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn view_config(&self) -> Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::from_json_file(path)?,
            None => ViewConfig::default(),
        };

        if let Some(value) = self.min_scale {
            config.min_scale = value;
        }
        if let Some(value) = self.max_scale {
            config.max_scale = value;
        }
        if let Some(value) = self.zoom_step {
            config.zoom_step = value;
        }
        if let Some(value) = self.label_threshold {
            config.label_visibility_scale_threshold = value;
        }
        if let Some(value) = self.drag_threshold {
            config.drag_threshold_pixels = value;
        }

        config
            .validate()
            .context("invalid view configuration after applying command-line overrides")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to install terminal logger")?;

    let config = args.view_config()?;
    log::debug!("view configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "netgraph-view",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::NetworkApp::new(
                cc,
                args.dataset.clone(),
                config.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the viewer window: {error}"))
}
