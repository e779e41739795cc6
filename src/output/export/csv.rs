//! CSV export functionality for advection simulation results
//!
//! This module writes concentration profiles to CSV (Comma-Separated
//! Values) files compatible with Excel, Python pandas, MATLAB, and most
//! data analysis tools.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use advect_rs::output::export::export_profiles_csv;
//!
//! export_profiles_csv(&grid, &[("initial", &initial)], "data.csv", None)?;
//! ```
//!
//! **Output** (`data.csv`):
//! ```csv
//! Distance (m),initial (kg/m³)
//! 0.000000,0.000000e0
//! 20.000000,0.000000e0
//! 40.000000,1.000000e-7
//! ```
//!
//! ## Full Result With Metadata
//!
//! ```rust,ignore
//! use advect_rs::output::export::{export_result_csv, CsvConfig};
//!
//! let mut config = CsvConfig::default();
//! config.include_metadata = true;
//!
//! export_result_csv(&grid, &result, "run.csv", Some(&config))?;
//! ```
//!
//! **Output** (`run.csv`):
//! ```csv
//! # Advection Simulation Data
//! # boundary policy: Frozen
//! # dt: 4
//! # solver: Upwind Advection
//! #
//! Distance (m),initial (kg/m³),t = 604 s (kg/m³)
//! 0.000000,0.000000e0,0.000000e0
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::physics::{ConcentrationProfile, Grid};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with run parameters
/// - `position_header`: Header for the position column
///
/// # Example
///
/// ```rust
/// use advect_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',  // European CSV
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Header for the position column (default: "Distance (m)")
    pub position_header: String,

    /// Unit suffix appended to each concentration header (default: "kg/m³")
    pub concentration_unit: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
            position_header: "Distance (m)".to_string(),
            concentration_unit: "kg/m³".to_string(),
        }
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export labeled concentration profiles, one column per profile
///
/// # Arguments
///
/// * `grid` - Node positions, written as the first column
/// * `profiles` - Labeled snapshots, one column each
/// * `output_path` - Destination file
/// * `config` - Optional CSV configuration
///
/// # Errors
///
/// - Empty profile list
/// - A profile length not matching the grid
/// - NaN in any profile (a corrupted export is worse than none)
/// - Any I/O failure
pub fn export_profiles_csv(
    grid: &Grid,
    profiles: &[(&str, &ConcentrationProfile)],
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("Nothing to export: profile list is empty".to_string().into());
    }
    for (label, profile) in profiles {
        if profile.len() != grid.len() {
            return Err(format!(
                "Profile '{}' has {} values for {} grid nodes",
                label,
                profile.len(),
                grid.len()
            )
            .into());
        }
        if profile.values().iter().any(|c| c.is_nan()) {
            return Err(format!("Profile '{}' contains NaN values", label).into());
        }
    }

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut file = File::create(output_path)?;
    write_header(&mut file, profiles, config, None)?;
    write_rows(&mut file, grid, profiles, config)?;

    Ok(())
}

/// Export the initial and final profile of a simulation result
///
/// With `include_metadata` enabled, the run metadata (solver name, time
/// step, boundary policy, ...) is written as `#` comment lines before the
/// column header.
pub fn export_result_csv(
    grid: &Grid,
    result: &SimulationResult,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let initial = result
        .initial_profile()
        .ok_or_else(|| "Simulation result has an empty trajectory".to_string())?;

    let final_label = format!("t = {} s", result.elapsed);
    let profiles: Vec<(&str, &ConcentrationProfile)> = vec![
        ("initial", initial),
        (final_label.as_str(), &result.final_profile),
    ];

    for (label, profile) in &profiles {
        if profile.len() != grid.len() {
            return Err(format!(
                "Profile '{}' has {} values for {} grid nodes",
                label,
                profile.len(),
                grid.len()
            )
            .into());
        }
    }

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut file = File::create(output_path)?;
    write_header(&mut file, &profiles, config, Some(result))?;
    write_rows(&mut file, grid, &profiles, config)?;

    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write optional metadata comments followed by the column header
fn write_header(
    file: &mut File,
    profiles: &[(&str, &ConcentrationProfile)],
    config: &CsvConfig,
    result: Option<&SimulationResult>,
) -> Result<(), Box<dyn Error>> {
    if config.include_metadata {
        writeln!(file, "# Advection Simulation Data")?;
        if let Some(result) = result {
            // Sorted for a deterministic file layout
            let mut entries: Vec<_> = result.metadata.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in entries {
                writeln!(file, "# {}: {}", key, value)?;
            }
        }
        writeln!(file, "#")?;
    }

    let mut header = config.position_header.clone();
    for (label, _) in profiles {
        header.push(config.delimiter);
        header.push_str(&format!("{} ({})", label, config.concentration_unit));
    }
    writeln!(file, "{}", header)?;

    Ok(())
}

/// Write one row per grid node
fn write_rows(
    file: &mut File,
    grid: &Grid,
    profiles: &[(&str, &ConcentrationProfile)],
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    for i in 0..grid.len() {
        let mut row = format!("{:.*}", config.precision, grid.position(i));
        for (_, profile) in profiles {
            row.push(config.delimiter);
            row.push_str(&format!("{:.*e}", config.precision, profile.get(i)));
        }
        writeln!(file, "{}", row)?;
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_setup() -> (Grid, ConcentrationProfile) {
        let grid = Grid::new(100.0, 20.0).unwrap();
        let profile = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
        (grid, profile)
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_export_single_profile() {
        let (grid, profile) = test_setup();
        let path = temp_path("advect_rs_test_export.csv");

        export_profiles_csv(&grid, &[("initial", &profile)], &path, None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Distance (m),initial (kg/m³)");
        assert_eq!(lines.len(), 1 + grid.len());
        assert!(lines[1].starts_with("0.000000,"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_custom_delimiter() {
        let (grid, profile) = test_setup();
        let path = temp_path("advect_rs_test_export_semicolon.csv");

        let config = CsvConfig {
            delimiter: ';',
            ..Default::default()
        };
        export_profiles_csv(&grid, &[("c", &profile)], &path, Some(&config)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().next().unwrap().contains(';'));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_length_mismatch_failed() {
        let (grid, _) = test_setup();
        let wrong = ConcentrationProfile::zeros(3);

        let result =
            export_profiles_csv(&grid, &[("c", &wrong)], &temp_path("unused.csv"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_nan_failed() {
        let (grid, _) = test_setup();
        let bad = ConcentrationProfile::from_vec(vec![0.0, f64::NAN, 0.0, 0.0, 0.0, 0.0]);

        let result = export_profiles_csv(&grid, &[("c", &bad)], &temp_path("unused.csv"), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("NaN"));
    }

    #[test]
    fn test_export_empty_list_failed() {
        let (grid, _) = test_setup();
        let result = export_profiles_csv(&grid, &[], &temp_path("unused.csv"), None);
        assert!(result.is_err());
    }
}
