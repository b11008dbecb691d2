use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::thread::JoinHandle;

use eframe::egui::{Color32, RichText};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};
use rfd::FileDialog;

use libbbcal_hv::config::{Config, SeriesConfig};
use libbbcal_hv::error::ProcessorError;
use libbbcal_hv::process::load_series;
use libbbcal_hv::series::{Series, SeriesColor};

fn render_error_dialog(show: &mut bool, ctx: &eframe::egui::Context) {
    eframe::egui::Window::new("Error")
        .open(show)
        .show(ctx, |ui| {
            ui.label("There was an error! Check the log file bbcal_hv.log for more information.")
        });
}

fn series_color32(color: SeriesColor) -> Color32 {
    let (r, g, b) = color.rgb();
    Color32::from_rgb(r, g, b)
}

/// The UI app which inherits the eframe::App trait.
///
/// Owns the configuration, the loaded series, and the loader thread.
#[derive(Debug)]
pub struct OverlayApp {
    config: Config,
    series: Vec<Series>,
    loader: Option<JoinHandle<Result<Vec<Series>, ProcessorError>>>,
    show_error_window: bool,
}

impl OverlayApp {
    /// Create the application
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut visuals = eframe::egui::Visuals::dark();
        visuals.override_text_color = Some(Color32::LIGHT_GRAY);
        cc.egui_ctx.set_visuals(visuals);
        OverlayApp {
            config: Config::default(),
            series: vec![],
            loader: None,
            show_error_window: false,
        }
    }

    /// Start the loader thread
    fn start_loader(&mut self) {
        // Safety first
        if self.loader.is_none() {
            let conf = self.config.clone();
            self.loader = Some(std::thread::spawn(move || load_series(&conf)));
        }
    }

    /// Collect the loader result once it is done
    fn poll_loader(&mut self) {
        let finished = self.loader.as_ref().is_some_and(|l| l.is_finished());
        if !finished {
            return;
        }
        if let Some(loader) = self.loader.take() {
            match loader.join() {
                Ok(Ok(series)) => {
                    spdlog::info!("Loaded {} series", series.len());
                    self.series = series;
                }
                Ok(Err(e)) => {
                    self.show_error_window = true;
                    spdlog::error!("Processor error: {e}");
                }
                Err(_) => {
                    self.show_error_window = true;
                    spdlog::error!("An error occured joining the loader thread!");
                }
            }
        }
    }

    /// Write the current Config to a file
    fn write_config(&mut self, path: &Path) {
        if let Ok(mut conf_file) = File::create(path) {
            match serde_yaml::to_string(&self.config) {
                Ok(yaml_str) => match conf_file.write(yaml_str.as_bytes()) {
                    Ok(_) => (),
                    Err(x) => {
                        spdlog::error!("Error writing config to file{}: {}", path.display(), x)
                    }
                },
                Err(x) => spdlog::error!(
                    "Unable to write configuration to file, serializer error: {}",
                    x
                ),
            };
        } else {
            self.show_error_window = true;
            spdlog::error!("Could not open file {} for config write", path.display());
        }
    }

    /// Read the Config from a file
    fn read_config(&mut self, path: &Path) {
        match Config::read_config_file(path) {
            Ok(conf) => self.config = conf,
            Err(e) => spdlog::error!("{}", e),
        }
    }

    fn series_grid(&mut self, ui: &mut eframe::egui::Ui) {
        let mut remove: Option<usize> = None;
        let mut picked: Option<(usize, std::path::PathBuf)> = None;
        let dialog_dir = if self.config.hv_set_path.exists() {
            self.config.hv_set_path.clone()
        } else {
            std::env::current_dir().expect("Couldn't access runtime directory")
        };
        eframe::egui::Grid::new("SeriesGrid").show(ui, |ui| {
            ui.label("File");
            ui.label("Label");
            ui.label("Color");
            ui.end_row();
            for (idx, series) in self.config.series.iter_mut().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(if series.file.is_empty() {
                        "None"
                    } else {
                        series.file.as_str()
                    });
                    if ui.button("Open...").clicked() {
                        if let Some(path) = FileDialog::new()
                            .set_directory(&dialog_dir)
                            .add_filter("HV set file", &["set", "txt"])
                            .pick_file()
                        {
                            picked = Some((idx, path));
                        }
                    }
                });
                ui.text_edit_singleline(&mut series.label);
                eframe::egui::ComboBox::from_id_source(format!("SeriesColor{idx}"))
                    .selected_text(series.color.name())
                    .show_ui(ui, |ui| {
                        for color in SeriesColor::ALL {
                            ui.selectable_value(&mut series.color, color, color.name());
                        }
                    });
                if ui.button("Remove").clicked() {
                    remove = Some(idx);
                }
                ui.end_row();
            }
        });
        if let Some((idx, path)) = picked {
            if let Some(name) = path.file_name() {
                self.config.series[idx].file = name.to_string_lossy().to_string();
            }
            // Picking a file repoints the hv_set directory too
            if let Some(parent) = path.parent() {
                self.config.hv_set_path = parent.to_path_buf();
            }
        }
        if let Some(idx) = remove {
            self.config.series.remove(idx);
        }
        if ui.button("Add series").clicked() {
            self.config.series.push(SeriesConfig {
                file: String::new(),
                label: format!("run {}", self.config.series.len() + 1),
                color: SeriesColor::ALL[self.config.series.len() % SeriesColor::ALL.len()],
            });
        }
    }

    fn plot(&self, ui: &mut eframe::egui::Ui) {
        Plot::new("hv_overlay")
            .legend(Legend::default())
            .x_axis_label(self.config.x_label.clone())
            .y_axis_label(self.config.y_label.clone())
            .show(ui, |plot_ui| {
                for series in self.series.iter() {
                    let points: PlotPoints = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(index, value)| [index as f64, *value])
                        .collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.label)
                            .color(series_color32(series.color))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(3.0),
                    );
                }
            });
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader();
        render_error_dialog(&mut self.show_error_window, ctx);
        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            //Menus
            ui.menu_button("File", |ui| {
                if ui.button("Open...").clicked() {
                    if let Some(path) = FileDialog::new()
                        .set_directory(
                            std::env::current_dir().expect("Couldn't access runtime directory"),
                        )
                        .add_filter("YAML file", &["yaml", "yml"])
                        .pick_file()
                    {
                        self.read_config(&path);
                    }
                }
                if ui.button("Save...").clicked() {
                    if let Some(path) = FileDialog::new()
                        .set_directory(
                            std::env::current_dir().expect("Couldn't access runtime directory"),
                        )
                        .add_filter("YAML file", &["yaml", "yml"])
                        .save_file()
                    {
                        self.write_config(&path);
                    }
                }
            });

            //Config
            ui.separator();
            ui.label(
                RichText::new("Configuration")
                    .color(Color32::LIGHT_BLUE)
                    .size(18.0),
            );
            eframe::egui::Grid::new("ConfigGrid").show(ui, |ui| {
                ui.label(format!(
                    "hv_set directory: {}",
                    self.config.hv_set_path.display()
                ));
                if ui.button("Open...").clicked() {
                    if let Some(path) = FileDialog::new()
                        .set_directory(
                            std::env::current_dir().expect("Couldn't access runtime directory"),
                        )
                        .pick_folder()
                    {
                        self.config.hv_set_path = path;
                    }
                }
                ui.end_row();

                ui.label("Plot title");
                ui.text_edit_singleline(&mut self.config.title);
                ui.end_row();

                ui.label("X axis label");
                ui.text_edit_singleline(&mut self.config.x_label);
                ui.end_row();

                ui.label("Y axis label");
                ui.text_edit_singleline(&mut self.config.y_label);
                ui.end_row();
            });

            ui.separator();
            ui.label(
                RichText::new("Series")
                    .color(Color32::LIGHT_BLUE)
                    .size(18.0),
            );
            self.series_grid(ui);

            //Controls
            // You can only load while the previous load isn't still running
            if ui
                .add_enabled(
                    self.loader.is_none(),
                    eframe::egui::Button::new("Load & Plot"),
                )
                .clicked()
            {
                spdlog::info!("Starting loader...");
                self.start_loader();
            }

            //Plot
            ui.separator();
            ui.label(
                RichText::new(&self.config.title)
                    .color(Color32::LIGHT_BLUE)
                    .size(18.0),
            );
            self.plot(ui);

            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        });
    }
}
