//! Solver trait, configuration, and result types
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: STABLE since v0.1.0
//! - `SolverConfiguration`: fields may be added, never removed
//! - `SimulationResult`: fields may be added, never removed

use crate::physics::ConcentrationProfile;
use crate::solver::Scenario;
use std::collections::HashMap;

// =================================================================================================
// Solver Configuration
// =================================================================================================

/// Configuration for a simulation run (HOW to solve)
///
/// # Time Step
///
/// When `time_step` is `None` the engine derives the stable step
/// `dx / max(velocity)` from the scenario, pinning the worst-case Courant
/// number at exactly 1. An explicit `time_step` is accepted for
/// experiments with smaller steps; an oversized step fails the stability
/// check before any marching happens.
///
/// # Examples
///
/// ```rust
/// use advect_rs::solver::SolverConfiguration;
///
/// // Derived stable step, 10 minutes of simulated time
/// let config = SolverConfiguration::until(600.0);
/// assert!(config.validate().is_ok());
///
/// // Explicit smaller step
/// let config = SolverConfiguration::with_time_step(600.0, 2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfiguration {
    /// Simulation horizon [s]
    pub end_time: f64,

    /// Explicit time step [s]; the stable step is derived when `None`
    pub time_step: Option<f64>,
}

impl SolverConfiguration {
    /// Run until `end_time` with the derived stable time step
    pub fn until(end_time: f64) -> Self {
        Self {
            end_time,
            time_step: None,
        }
    }

    /// Run until `end_time` with an explicitly chosen time step
    pub fn with_time_step(end_time: f64, time_step: f64) -> Self {
        Self {
            end_time,
            time_step: Some(time_step),
        }
    }

    /// Validate that parameters are physically meaningful
    ///
    /// An end time of exactly zero is allowed: the marching contract still
    /// performs one step in that case (see [`UpwindSolver`]).
    ///
    /// [`UpwindSolver`]: crate::solver::UpwindSolver
    pub fn validate(&self) -> Result<(), String> {
        if !self.end_time.is_finite() || self.end_time < 0.0 {
            return Err(format!(
                "End time must be finite and non-negative, got {}",
                self.end_time
            ));
        }
        if let Some(dt) = self.time_step {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(format!("Time step must be positive, got {}", dt));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation Result
// =================================================================================================

/// Complete outcome of a simulation run
///
/// Holds the full trajectory (every snapshot plus its time point), the
/// final profile, and the stability diagnostics the caller is expected to
/// surface.
///
/// # Trajectory Convention
///
/// `time_points[0] == 0.0` and `trajectory[0]` is the initial profile;
/// entry `k` is the state after `k` applications of the operator. Hence
/// `trajectory.len() == steps + 1`.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Simulated time of each snapshot [s]
    pub time_points: Vec<f64>,

    /// Concentration snapshot at each time point
    pub trajectory: Vec<ConcentrationProfile>,

    /// Final concentration profile (same as the last trajectory entry)
    pub final_profile: ConcentrationProfile,

    /// Number of operator applications performed
    pub steps: usize,

    /// Simulated time actually reached [s]
    pub elapsed: f64,

    /// Time step used [s]
    pub time_step: f64,

    /// Largest Courant number over all nodes
    ///
    /// Callers should surface a warning when this exceeds 1; the engine
    /// refuses to march such an operator in the first place.
    pub max_courant: f64,

    /// Free-form run metadata for diagnostics and reproducibility
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result from the marching outcome
    pub fn new(
        time_points: Vec<f64>,
        trajectory: Vec<ConcentrationProfile>,
        final_profile: ConcentrationProfile,
        time_step: f64,
        max_courant: f64,
    ) -> Self {
        let steps = trajectory.len().saturating_sub(1);
        let elapsed = time_points.last().copied().unwrap_or(0.0);

        Self {
            time_points,
            trajectory,
            final_profile,
            steps,
            elapsed,
            time_step,
            max_courant,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of stored snapshots (steps + 1)
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// The t = 0 snapshot
    pub fn initial_profile(&self) -> Option<&ConcentrationProfile> {
        self.trajectory.first()
    }
}

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Trait for numerical solvers
///
/// # Responsibility
///
/// A solver consumes a [`Scenario`] (WHAT to solve) and a
/// [`SolverConfiguration`] (HOW to solve) and produces a
/// [`SimulationResult`]. The scenario carries no numerics; the solver
/// carries no reach description.
pub trait Solver {
    /// Run the simulation to completion
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String>;

    /// Name of the method (used for display and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
