//! The loading pipeline behind both frontends: read each configured set
//! file, run the shower extractor over it, and convert the tokens to
//! numbers. One routine, parameterized by the config, instead of one script
//! per combination of input files.

use std::fs;

use super::config::{Config, SeriesConfig};
use super::error::ProcessorError;
use super::extract::{extract_shower_hv, parse_hv_values};
use super::series::Series;

/// Load one configured series from disk.
fn load_one(config: &Config, series: &SeriesConfig) -> Result<Series, ProcessorError> {
    let path = config.get_series_path(series)?;
    spdlog::info!("Reading HV file {}", path.display());
    let contents = fs::read_to_string(&path)?;
    let tokens = extract_shower_hv(contents.lines())?;
    let values = parse_hv_values(&tokens)?;
    spdlog::info!(
        "Extracted {} shower channels from {}",
        values.len(),
        series.file
    );
    Ok(Series::new(series.label.clone(), series.color, values))
}

/// Load every configured series, in config order. The first failure aborts
/// the whole load; partial overlays would be worse than no overlay.
pub fn load_series(config: &Config) -> Result<Vec<Series>, ProcessorError> {
    config
        .series
        .iter()
        .map(|series| load_one(config, series))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::series::SeriesColor;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bbcal_hv_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn series_config(file: &str, label: &str) -> SeriesConfig {
        SeriesConfig {
            file: String::from(file),
            label: String::from(label),
            color: SeriesColor::default(),
        }
    }

    #[test]
    fn test_load_series_end_to_end() {
        let dir = scratch_dir("load");
        std::fs::write(
            dir.join("a.set"),
            "rpi17:2001 s2 DV 12 -1 -2 -3 -4 -5\nrpi17:2001 s5 DV 12 -6 -7\nrpi99:9999 s1 DV 12 -8\n",
        )
        .unwrap();
        std::fs::write(dir.join("b.set"), "rpi18:2001 s7 DV 12 -9.5\n").unwrap();

        let config = Config {
            hv_set_path: dir.clone(),
            series: vec![series_config("a.set", "run a"), series_config("b.set", "run b")],
            ..Default::default()
        };

        let loaded = load_series(&config).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].label, "run a");
        assert_eq!(loaded[0].values, vec![-4.0, -5.0, -6.0, -7.0]);
        assert_eq!(loaded[1].values, vec![-9.5]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_series_file_aborts() {
        let dir = scratch_dir("missing");
        let config = Config {
            hv_set_path: dir.clone(),
            series: vec![series_config("nope.set", "missing")],
            ..Default::default()
        };
        assert!(matches!(
            load_series(&config),
            Err(ProcessorError::ConfigError(_))
        ));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_aborts() {
        let dir = scratch_dir("malformed");
        std::fs::write(dir.join("bad.set"), "rpi17:2001 s5 DV 12 -1 oops\n").unwrap();
        let config = Config {
            hv_set_path: dir.clone(),
            series: vec![series_config("bad.set", "bad")],
            ..Default::default()
        };
        assert!(matches!(
            load_series(&config),
            Err(ProcessorError::ExtractError(_))
        ));
        let _ = std::fs::remove_dir_all(dir);
    }
}
