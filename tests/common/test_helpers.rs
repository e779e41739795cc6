//! Helper functions for integration tests

use advect_rs::physics::{ConcentrationProfile, Grid};

/// Assert that two concentration profiles are close (within tolerance)
pub fn assert_profiles_close(
    profile1: &ConcentrationProfile,
    profile2: &ConcentrationProfile,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(
        profile1.len(),
        profile2.len(),
        "{}: Dimension mismatch",
        message
    );

    for i in 0..profile1.len() {
        let diff = (profile1.get(i) - profile2.get(i)).abs();
        assert!(
            diff < tolerance,
            "{}: Node {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Concentration-weighted mean position of the tracer [m]
///
/// Returns 0 when the profile holds no mass.
pub fn center_of_mass(grid: &Grid, profile: &ConcentrationProfile) -> f64 {
    let mass = profile.total_mass();
    if mass.abs() < 1e-300 {
        return 0.0;
    }

    let mut weighted = 0.0;
    for i in 0..profile.len() {
        weighted += grid.position(i) * profile.get(i);
    }
    weighted / mass
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_center_of_mass() {
        let grid = Grid::new(100.0, 20.0).unwrap();
        let profile = ConcentrationProfile::from_vec(vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);

        // Mass sits evenly on nodes at 40 and 60
        assert!((center_of_mass(&grid, &profile) - 50.0).abs() < 1e-12);
    }
}
