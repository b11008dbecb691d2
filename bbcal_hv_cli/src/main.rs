//! # bbcal_hv_cli
//!
//! Part of the bbcal_hv crate family.
//!
//! Headless counterpart of the bbcal_hv GUI: renders the shower HV overlay
//! to a PNG instead of a window, and carries the set-file bookkeeping
//! subcommands (`shift`, `combine`) that have no interactive part at all.
//!
//! ```bash
//! bbcal_hv_cli new -c overlay.yaml
//! bbcal_hv_cli plot -c overlay.yaml -o overlay.png
//! bbcal_hv_cli shift --hv-set hv_set --run 11845 --shift 15.0
//! bbcal_hv_cli combine --hv-set hv_set --shower sh.set --preshower ps.set --output hv_combined
//! ```

use clap::{value_parser, Arg, Command};
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use libbbcal_hv::combine::combine_files;
use libbbcal_hv::config::Config;
use libbbcal_hv::process::load_series;
use libbbcal_hv::series::Series;
use libbbcal_hv::shift::shift_run;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

/// Render the overlay scatter plot to a PNG file.
fn render_png(config: &Config, series: &[Series], path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_len = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for value in &s.values {
            y_min = y_min.min(*value);
            y_max = y_max.max(*value);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(config.title.as_str(), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            -0.5f64..(max_len as f64 - 0.5).max(0.5),
            (y_min - pad)..(y_max + pad),
        )?;
    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .draw()?;

    for s in series {
        let (r, g, b) = s.color.rgb();
        let color = RGBColor(r, g, b);
        chart
            .draw_series(
                s.values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| Circle::new((index as f64, *value), 4, color.filled())),
            )?
            .label(s.label.clone())
            .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;
    root.present()?;
    Ok(())
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .required(true)
        .help("Path to the configuration yaml file")
}

fn hv_set_arg() -> Arg {
    Arg::new("hv-set")
        .long("hv-set")
        .default_value("hv_set")
        .help("Directory holding the .set files")
}

fn main() {
    // Create a cli
    let matches = Command::new("bbcal_hv_cli")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("new")
                .about("Make a template configuration yaml file")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("plot")
                .about("Render the shower HV overlay to a PNG")
                .arg(config_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("overlay.png")
                        .help("Path of the PNG to write"),
                ),
        )
        .subcommand(
            Command::new("shift")
                .about("Shift every HV set point of a run by an offset")
                .arg(hv_set_arg())
                .arg(
                    Arg::new("run")
                        .long("run")
                        .required(true)
                        .value_parser(value_parser!(i32))
                        .help("Run number; reads run_<n>_hv.set"),
                )
                .arg(
                    Arg::new("shift")
                        .long("shift")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .allow_hyphen_values(true)
                        .help("Offset in mV, subtracted from every non-exempt channel"),
                ),
        )
        .subcommand(
            Command::new("combine")
                .about("Combine shower and preshower set files into one")
                .arg(hv_set_arg())
                .arg(
                    Arg::new("shower")
                        .long("shower")
                        .required(true)
                        .help("Shower set file name inside the hv_set directory"),
                )
                .arg(
                    Arg::new("preshower")
                        .long("preshower")
                        .required(true)
                        .help("Preshower set file name inside the hv_set directory"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("hv_combined")
                        .help("Output file name, without extension; the date is appended"),
                ),
        )
        .get_matches();

    spdlog::default_logger().set_flush_level_filter(spdlog::LevelFilter::All);

    match matches.subcommand() {
        Some(("new", args)) => {
            let config_path = PathBuf::from(args.get_one::<String>("config").expect("required"));
            spdlog::info!(
                "Making a template config at {}...",
                config_path.to_string_lossy()
            );
            make_template_config(&config_path);
            spdlog::info!("Done.");
        }
        Some(("plot", args)) => {
            let config_path = PathBuf::from(args.get_one::<String>("config").expect("required"));
            let output = PathBuf::from(args.get_one::<String>("output").expect("defaulted"));

            spdlog::info!("Loading config from {}...", config_path.to_string_lossy());
            let config = match Config::read_config_file(&config_path) {
                Ok(c) => c,
                Err(e) => {
                    spdlog::error!("{e}");
                    return;
                }
            };
            spdlog::info!("Config successfully loaded.");
            spdlog::info!("hv_set path: {}", config.hv_set_path.to_string_lossy());
            for series in config.series.iter() {
                spdlog::info!("Series: {} ({})", series.label, series.file);
            }

            let series = match load_series(&config) {
                Ok(s) => s,
                Err(e) => {
                    spdlog::error!("Loading failed with error: {e}");
                    return;
                }
            };
            match render_png(&config, &series, &output) {
                Ok(()) => spdlog::info!("Overlay written to {}", output.display()),
                Err(e) => spdlog::error!("Rendering failed with error: {e}"),
            }
        }
        Some(("shift", args)) => {
            let hv_set = PathBuf::from(args.get_one::<String>("hv-set").expect("defaulted"));
            let run = *args.get_one::<i32>("run").expect("required");
            let shift = *args.get_one::<f64>("shift").expect("required");
            match shift_run(&hv_set, run, shift) {
                Ok(path) => spdlog::info!("Done, wrote {}", path.display()),
                Err(e) => spdlog::error!("Shifting failed with error: {e}"),
            }
        }
        Some(("combine", args)) => {
            let hv_set = PathBuf::from(args.get_one::<String>("hv-set").expect("defaulted"));
            let shower = args.get_one::<String>("shower").expect("required");
            let preshower = args.get_one::<String>("preshower").expect("required");
            let output = args.get_one::<String>("output").expect("defaulted");
            match combine_files(&hv_set, shower, preshower, output) {
                Ok(path) => spdlog::info!("Done, wrote {}", path.display()),
                Err(e) => spdlog::error!("Combining failed with error: {e}"),
            }
        }
        _ => (),
    }
}
