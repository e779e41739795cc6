//! Static plot generation for advection simulation results
//!
//! This module uses the `plotters` library to generate static images
//! (PNG, SVG) of concentration profiles and velocity fields along the
//! reach.
//!
//! # Example: Initial vs Final Profile
//!
//! ```rust,ignore
//! use advect_rs::output::visualization::{plot_result, PlotConfig};
//!
//! // Run simulation, then plot both ends of the trajectory
//! let result = UpwindSolver::new().solve(&scenario, &config)?;
//! plot_result(&grid, &result, "profiles.png", None)?;
//! ```
//!
//! # Example: Velocity Field
//!
//! ```rust,ignore
//! use advect_rs::output::visualization::plot_velocity;
//!
//! plot_velocity(&grid, &velocity, "velocity.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use crate::output::visualization::PlotConfig;
use crate::physics::{ConcentrationProfile, Grid, VelocityField};
use crate::solver::SimulationResult;

// =================================================================================================
// Public Plotting Functions
// =================================================================================================

/// Plot a single concentration profile against distance
///
/// # Arguments
///
/// * `grid` - Node positions [m]
/// * `profile` - Concentration snapshot to draw
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional plot configuration
pub fn plot_profile(
    grid: &Grid,
    profile: &ConcentrationProfile,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    plot_profiles(grid, &[("concentration", profile)], output_path, config)
}

/// Plot several labeled concentration profiles on one chart
///
/// Typical use is the initial condition against the final state, the same
/// comparison the presentation layer of a field study would print.
///
/// # Arguments
///
/// * `grid` - Node positions [m]
/// * `profiles` - Labeled snapshots, drawn in order
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional plot configuration
pub fn plot_profiles(
    grid: &Grid,
    profiles: &[(&str, &ConcentrationProfile)],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("Nothing to plot: profile list is empty".to_string().into());
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
    }

    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    let series: Vec<(&str, Vec<f64>)> = profiles
        .iter()
        .map(|(label, profile)| (*label, profile.values().iter().cloned().collect()))
        .collect();

    render(grid, &series, output_path, config)
}

/// Plot the initial and final profile of a simulation result
///
/// # Arguments
///
/// * `grid` - Node positions [m]
/// * `result` - Completed simulation run
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional plot configuration
pub fn plot_result(
    grid: &Grid,
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let initial = result
        .initial_profile()
        .ok_or_else(|| "Simulation result has an empty trajectory".to_string())?;

    let final_label = format!("t = {} s", result.elapsed);

    plot_profiles(
        grid,
        &[
            ("initial", initial),
            (final_label.as_str(), &result.final_profile),
        ],
        output_path,
        config,
    )
}

/// Plot the velocity field against distance
///
/// # Arguments
///
/// * `grid` - Node positions [m]
/// * `velocity` - Velocity field to draw
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional plot configuration; defaults to
///   [`PlotConfig::velocity`]
pub fn plot_velocity(
    grid: &Grid,
    velocity: &VelocityField,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if velocity.len() != grid.len() {
        return Err(format!(
            "Velocity field has {} values for {} grid nodes",
            velocity.len(),
            grid.len()
        )
        .into());
    }

    let default_config = PlotConfig::velocity();
    let config = config.unwrap_or(&default_config);

    let series = vec![("velocity", velocity.values().iter().cloned().collect())];

    render(grid, &series, output_path, config)
}

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Dispatch on the file extension, then draw
fn render(
    grid: &Grid,
    series: &[(&str, Vec<f64>)],
    output_path: &str,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if output_path.ends_with(".svg") {
        let root =
            SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, grid, series, config)
    } else {
        let root =
            BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, grid, series, config)
    }
}

/// Draw labeled series on any drawing area
fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &Grid,
    series: &[(&str, Vec<f64>)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    // Find ranges for axes
    let (x_min, x_max) = grid.span();

    let mut max_value = f64::NEG_INFINITY;
    let mut min_value = f64::INFINITY;
    for (_, values) in series {
        for &v in values {
            max_value = max_value.max(v);
            min_value = min_value.min(v);
        }
    }

    // Build margins (10% space); a flat series still needs a nonzero span
    let y_range = max_value - min_value;
    let (y_min, y_max) = if y_range > 0.0 {
        ((min_value - 0.1 * y_range).max(0.0), max_value + 0.1 * y_range)
    } else {
        (min_value - 1.0, max_value + 1.0)
    };

    root.fill(&config.background)?;

    // Create chart
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    // Configure mesh
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    // Draw one line per series
    for (i, (label, values)) in series.iter().enumerate() {
        let color = if series.len() == 1 {
            config.line_color
        } else {
            config.series_color(i)
        };

        chart
            .draw_series(LineSeries::new(
                grid.positions()
                    .iter()
                    .zip(values.iter())
                    .map(|(x, v)| (*x, *v)),
                color.stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    // Draw legend only when there is something to distinguish
    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::VelocityField;

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
    fn test_plot_profile_png() {
        let (grid, profile) = test_setup();
        let path = temp_path("advect_rs_test_profile.png");

        plot_profile(&grid, &profile, &path, None).unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_profiles_svg() {
        let (grid, profile) = test_setup();
        let shifted = ConcentrationProfile::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let path = temp_path("advect_rs_test_profiles.svg");

        plot_profiles(
            &grid,
            &[("initial", &profile), ("final", &shifted)],
            &path,
            None,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_velocity() {
        let (grid, _) = test_setup();
        let velocity = VelocityField::uniform(&grid, 5.0).unwrap();
        let path = temp_path("advect_rs_test_velocity.png");

        plot_velocity(&grid, &velocity, &path, None).unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_empty_series_failed() {
        let (grid, _) = test_setup();
        let result = plot_profiles(&grid, &[], &temp_path("unused.png"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_plot_length_mismatch_failed() {
        let (grid, _) = test_setup();
        let wrong = ConcentrationProfile::zeros(3);

        let result = plot_profile(&grid, &wrong, &temp_path("unused.png"), None);
        assert!(result.is_err());
    }
}
