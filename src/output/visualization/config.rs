//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by profile (spatial concentration) and velocity plots.
///
/// # Example
///
/// ```rust
/// use advect_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::default();
/// config.title = "Steady state conditions".to_string();
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Concentration Profile")
    pub title: String,

    /// X-axis label (default: "Distance (m)")
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (kg/m³)")
    pub ylabel: String,

    /// Line color for single-series plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-series plots (one per series)
    ///
    /// If None, uses the default palette: [RED, BLUE, GREEN, MAGENTA, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Concentration Profile".to_string(),
            xlabel: "Distance (m)".to_string(),
            ylabel: "Concentration (kg/m³)".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    /// Config for a velocity plot (adjusted title and y-axis label)
    pub fn velocity() -> Self {
        Self {
            title: "Velocity Along the Reach".to_string(),
            ylabel: "Velocity (m/s)".to_string(),
            ..Self::default()
        }
    }

    /// Config for multi-series plots with custom colors
    pub fn with_series_colors(colors: Vec<RGBColor>) -> Self {
        Self {
            series_colors: Some(colors),
            ..Self::default()
        }
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to the default
    /// palette.
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        // Default palette
        let default_colors = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];

        default_colors[index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
