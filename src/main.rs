mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;
mod view;

use anyhow::{anyhow, Context, Result};
use app::ExplorerApp;
use clap::Parser;
use config::Settings;
use data::filter::Filters;
use data::loader::load_table;
use eframe::egui;
use view::DashboardView;

fn main() -> Result<()> {
    env_logger::init();
    let settings = Settings::parse();

    if settings.headless {
        return run_headless(&settings);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        view::TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(settings)))),
    )
    .map_err(|e| anyhow!("running the window: {e}"))
}

/// One pass of the pipeline printed to stdout.
fn run_headless(settings: &Settings) -> Result<()> {
    let request = settings.load_request(!settings.no_sample, None);
    let table = load_table(&request).context("loading paper metadata")?;

    let mut filters = Filters::for_table(&table);
    settings.apply_filter_flags(&mut filters);
    log::debug!("Headless filters: {filters:?}");

    let dashboard = DashboardView::compute(&table, &filters);
    print!("{}", report::render_text(&dashboard));
    Ok(())
}
