//! Numerical core: operator assembly and time marching
//!
//! # The Architecture (WHAT vs HOW)
//!
//! The solver separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Grid, velocity field, initial profile
//!    - Boundary policy
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Simulation end time
//!    - Optional explicit time step (the stable step is derived otherwise)
//!
//! 3. **Solver** (`Solver` trait + `UpwindSolver`) - The numerical method
//!    - Assembles the sparse upwind transport operator
//!    - Marches it forward until the horizon is reached
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver` trait, `SolverConfiguration`, `SimulationResult`
//! - **`scenario`**: problem definition and validation
//! - **`operator`**: `TransportOperator` and `BoundaryPolicy`
//! - **`marching`**: `UpwindSolver`, the time-marching engine
//!
//! # Quick Start Example
//!
//! ```rust
//! use advect_rs::physics::{ConcentrationProfile, Grid, VelocityField};
//! use advect_rs::solver::{
//!     BoundaryPolicy, Scenario, Solver, SolverConfiguration, UpwindSolver,
//! };
//!
//! # fn main() -> Result<(), String> {
//! let grid = Grid::new(100.0, 20.0)?;
//! let velocity = VelocityField::uniform(&grid, 5.0)?;
//! let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
//!
//! let scenario = Scenario::new(grid, velocity, initial, BoundaryPolicy::PassThrough);
//! let config = SolverConfiguration::until(60.0);
//!
//! let result = UpwindSolver::new().solve(&scenario, &config)?;
//! assert_eq!(result.steps, 16); // dt = 4 s, floor(60/4) + 1 steps
//! # Ok(())
//! # }
//! ```
//!
//! # Stability
//!
//! The explicit upwind scheme is stable only while every per-node Courant
//! number `velocity * dt / dx` stays at or below 1. The derived time step
//! `dx / max(velocity)` pins the worst node at exactly 1; an externally
//! supplied step that breaks the bound is rejected before the first
//! iteration, never silently integrated.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod scenario;
mod operator;
mod marching;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand work off to Rayon is a numerical-execution
// concern, not a reach-description concern.  It therefore lives here
// (solver) rather than in physics.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (useful in benchmarks and tests) without requiring a mutex on
// every operator assembly.  Relaxed ordering is sufficient: the value is a
// performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid nodes above which operator assembly switches to
/// parallel iteration.
///
/// The crossover is set at 1 000 nodes.  Below that point the overhead of
/// Rayon's thread-pool dispatch outweighs the per-node Courant arithmetic.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Operator assembly uses sequential iteration when the grid has fewer
/// nodes than this value, and switches to Rayon when it has more — but
/// only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use advect_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.  A zero-node threshold would force
/// parallel dispatch on every assembly, which is never the intended
/// behaviour.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.  Prevents one test from leaking a modified
/// threshold value into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring to any value never
        // panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SimulationResult, Solver, SolverConfiguration};

pub use scenario::Scenario;
pub use operator::{BoundaryPolicy, TransportOperator, COURANT_TOLERANCE};
pub use marching::UpwindSolver;

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::ConcentrationProfile;

/// Validate a concentration profile for numerical issues
///
/// Checks that the profile does not contain NaN or Inf values, which would
/// indicate numerical instability or corrupted input.
///
/// # Arguments
///
/// * `profile` - Concentration profile to validate
/// * `step` - Current time step (for error reporting)
///
/// # Returns
///
/// `Ok(())` if the profile is valid, `Err(msg)` with diagnostic
/// information otherwise
pub(crate) fn validate_profile(profile: &ConcentrationProfile, step: usize) -> Result<(), String> {
    // NaN can arise from 0/0, Inf - Inf, or corrupted external input
    if profile.values().iter().any(|c| c.is_nan()) {
        return Err(format!(
            "NaN detected in concentration at step {}. This indicates numerical \
             instability or an invalid initial profile.",
            step
        ));
    }

    // Inf indicates overflow, which the stability bound normally prevents
    if profile.values().iter().any(|c| c.is_infinite()) {
        return Err(format!(
            "Infinity detected in concentration at step {}. This indicates numerical \
             overflow; check the Courant bound of the operator.",
            step
        ));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        // Guard dropped — value must be back to what it was before.
        assert_eq!(parallel_threshold(), before);
    }

    #[test]
    fn test_validate_profile_accepts_finite_values() {
        let profile = ConcentrationProfile::from_vec(vec![0.0, 1.0, 2.0]);
        assert!(validate_profile(&profile, 1).is_ok());
    }

    #[test]
    fn test_validate_profile_detects_nan() {
        let profile = ConcentrationProfile::from_vec(vec![0.0, f64::NAN, 2.0]);
        let result = validate_profile(&profile, 7);

        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.contains("NaN"));
        assert!(error.contains("step 7"));
    }

    #[test]
    fn test_validate_profile_detects_inf() {
        let profile = ConcentrationProfile::from_vec(vec![0.0, f64::INFINITY]);
        let result = validate_profile(&profile, 3);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Infinity"));
    }
}
