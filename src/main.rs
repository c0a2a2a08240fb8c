mod analysis;
mod app;
mod color;
mod data;
mod pipeline;
mod report;
mod state;
mod ui;

use std::io::{self, Write};

use anyhow::Context;
use app::IrisExplorerApp;
use data::source::BundledIris;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Task 1: load and clean. Faults stop here and are reported, not raised.
    let prepared = pipeline::prepare(&BundledIris, &mut out);

    // Task 2: analysis. No recovery: without a table the run ends here.
    let table = prepared.into_table()?;
    let analysis = pipeline::analyse(&table, &mut out).context("printing analysis")?;
    out.flush()?;
    drop(out);

    // Task 3: charts.
    let state = AppState::new(&table, analysis);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    log::info!("opening chart window");
    eframe::run_native(
        "Iris Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(IrisExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
