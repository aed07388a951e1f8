mod analysis;
mod app;
mod cli;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::ShipwreckApp;
use clap::Parser;
use cli::Args;
use config::ColumnConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let columns = args.column_config()?;

    if args.report {
        run_report(&args, &columns)
    } else {
        run_viewer(&args, columns)
    }
}

/// Load once, run one pass, print it.
fn run_report(args: &Args, columns: &ColumnConfig) -> Result<()> {
    let path = args
        .file
        .as_deref()
        .context("--report needs a FILE to summarize")?;
    let dataset = data::loader::load_file(path, columns)
        .with_context(|| format!("loading {}", path.display()))?;

    let params = args.apply_overrides(analysis::AnalysisParams::for_dataset(&dataset));
    let analysis = analysis::run(&dataset.records, &params);

    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), &analysis)?;

    if let Some(out) = &args.export_markers {
        report::write_markers_json(out, &analysis.map)?;
        log::info!("Exported markers to {}", out.display());
    }
    Ok(())
}

fn run_viewer(args: &Args, columns: ColumnConfig) -> Result<()> {
    let mut state = AppState::new(columns);
    if let Some(path) = &args.file {
        state.load_path(path);
        if state.dataset.is_some() {
            state.params = args.apply_overrides(state.params);
            state.refresh();
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shipwreck Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ShipwreckApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
