//! Common utilities for integration tests

#![allow(dead_code)]

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{assert_profiles_close, center_of_mass, relative_error};

use advect_rs::physics::{ConcentrationProfile, Grid, VelocityField};
use advect_rs::solver::{BoundaryPolicy, Scenario};

/// Scenario with uniform velocity and a rectangular pulse
pub fn uniform_scenario(
    length: f64,
    spacing: f64,
    velocity: f64,
    pulse: (f64, f64, f64),
    boundary: BoundaryPolicy,
) -> Scenario {
    let grid = Grid::new(length, spacing).unwrap();
    let field = VelocityField::uniform(&grid, velocity).unwrap();
    let (start, end, value) = pulse;
    let initial = ConcentrationProfile::pulse(&grid, start, end, value);
    Scenario::new(grid, field, initial, boundary)
}

/// The 5 km river reach: sinusoidal velocity, tracer released over
/// the first stretch
pub fn river_scenario(boundary: BoundaryPolicy) -> Scenario {
    let grid = Grid::new(5000.0, 20.0).unwrap();
    let velocity =
        VelocityField::from_function(&grid, |x| (x / 100.0 + 600.0).sin() + 5.0).unwrap();
    let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1e-7);
    Scenario::new(grid, velocity, initial, boundary)
}
