//! # bbcal_hv
//!
//! Part of the bbcal_hv crate family.
//!
//! This is the application to inspect BBCal HV set files with a GUI using
//! [egui](https://github.com/emilk/egui).
//!
//! ## Install
//!
//! Use `cargo install --path ./bbcal_hv`
//!
//! ## Use
//!
//! To launch the application simply invoke it after it is installed
//!
//! ```bash
//! bbcal_hv
//! ```
//!
//! Point the hv_set directory at your set files, add one row per run to
//! overlay, and click Load & Plot.
//!
//! ## Configuration
//!
//! The following configuration controls are available in the GUI:
//!
//! - hv_set directory: the directory holding the `.set` files.
//! - Plot title / axis labels: free text drawn on the plot.
//! - Series rows: one per overlaid file, each with a file picker (picking a
//!   file also repoints the hv_set directory at its parent), a legend label,
//!   and a marker color.
//!
//! Configurations can be saved using File->Save and loaded using File->Open,
//! and the same YAML file drives the bbcal_hv_cli `plot` subcommand.

mod app;
use app::OverlayApp;
use std::path::PathBuf;
use std::sync::Arc;

/// The program entry point
fn main() {
    // Setup logging to a file
    let file_sink = Arc::new(
        spdlog::sink::FileSink::builder()
            .path(PathBuf::from("./bbcal_hv.log"))
            .formatter(spdlog::formatter::PatternFormatter::new(
                spdlog::formatter::pattern!(
                    "[{date_short} {time_short}] - [thread: {tid}] - [{^{level}}] - {payload}{eol}"
                ),
            ))
            .truncate(true)
            .build()
            .unwrap(),
    );
    let logger = Arc::new(
        spdlog::Logger::builder()
            .flush_level_filter(spdlog::LevelFilter::All)
            .sink(file_sink)
            .build()
            .unwrap(),
    );
    spdlog::set_default_logger(logger);
    spdlog::info!("Starting BBCal HV overlay UI");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("BBCal HV")
            .with_inner_size(eframe::epaint::vec2(900.0, 700.0))
            .with_min_inner_size(eframe::epaint::vec2(600.0, 400.0)),
        ..Default::default()
    };
    match eframe::run_native(
        "bbcal_hv",
        native_options,
        Box::new(|cc| Ok(Box::new(OverlayApp::new(cc)))),
    ) {
        Ok(()) => (),
        Err(e) => spdlog::error!("Eframe error: {}", e),
    }
}
