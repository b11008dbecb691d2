use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::series::SeriesColor;

/// One input file of the overlay plot with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// File name inside the hv_set directory.
    pub file: String,
    pub label: String,
    pub color: SeriesColor,
}

/// Structure representing the application configuration. Contains the hv_set
/// directory, the plot text, and the list of series to overlay.
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub hv_set_path: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hv_set_path: PathBuf::from("hv_set"),
            title: String::from("BBCal Shower HV overlay"),
            x_label: String::from("Channel index"),
            y_label: String::from("HV set point (V)"),
            series: vec![SeriesConfig {
                file: String::from(""),
                label: String::from("run"),
                color: SeriesColor::default(),
            }],
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Full path of one configured series file inside the hv_set directory
    pub fn get_series_path(&self, series: &SeriesConfig) -> Result<PathBuf, ConfigError> {
        let path = self.hv_set_path.join(&series.file);
        if path.exists() {
            Ok(path)
        } else {
            Err(ConfigError::BadFilePath(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.series = vec![
            SeriesConfig {
                file: String::from("hv_calibrated_run_11845_15mV_11_18_2021.set"),
                label: String::from("run 11845"),
                color: SeriesColor::Red,
            },
            SeriesConfig {
                file: String::from("run_11900_hv.set"),
                label: String::from("run 11900"),
                color: SeriesColor::Green,
            },
        ];
        let yaml_str = serde_yaml::to_string(&config).unwrap();
        let reread = serde_yaml::from_str::<Config>(&yaml_str).unwrap();
        assert_eq!(reread.series.len(), 2);
        assert_eq!(reread.series[1].label, "run 11900");
        assert_eq!(reread.series[0].color, SeriesColor::Red);
        assert_eq!(reread.hv_set_path, config.hv_set_path);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::read_config_file(Path::new("does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigError::BadFilePath(_))));
    }
}
