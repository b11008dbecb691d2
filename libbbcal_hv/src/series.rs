use serde::{Deserialize, Serialize};

/// Display color of one overlay series. Both frontends map this onto their
/// own color type, so the library stays free of any UI dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesColor {
    #[default]
    Blue,
    Red,
    Green,
    Magenta,
    Cyan,
    Yellow,
}

impl SeriesColor {
    pub const ALL: [SeriesColor; 6] = [
        SeriesColor::Blue,
        SeriesColor::Red,
        SeriesColor::Green,
        SeriesColor::Magenta,
        SeriesColor::Cyan,
        SeriesColor::Yellow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SeriesColor::Blue => "Blue",
            SeriesColor::Red => "Red",
            SeriesColor::Green => "Green",
            SeriesColor::Magenta => "Magenta",
            SeriesColor::Cyan => "Cyan",
            SeriesColor::Yellow => "Yellow",
        }
    }

    /// 8-bit RGB triple for the renderers.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SeriesColor::Blue => (40, 110, 255),
            SeriesColor::Red => (220, 50, 40),
            SeriesColor::Green => (30, 160, 60),
            SeriesColor::Magenta => (200, 40, 200),
            SeriesColor::Cyan => (0, 180, 200),
            SeriesColor::Yellow => (230, 190, 30),
        }
    }
}

/// One loaded overlay series: the extracted shower values plus the display
/// metadata they are rendered with.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: String, color: SeriesColor, values: Vec<f64>) -> Self {
        Self {
            label,
            color,
            values,
        }
    }
}
