//! Upwind time-marching engine
//!
//! # Algorithm
//!
//! 1. Validate configuration and scenario
//! 2. Assemble the transport operator (derived or explicit time step)
//! 3. Refuse to march when the Courant bound is violated
//! 4. Loop `next = operator · current` while `elapsed <= end_time`,
//!    storing every snapshot
//! 5. Return the trajectory, the final profile, and the diagnostics
//!
//! # Loop Contract
//!
//! The loop condition is checked on the elapsed time *before* each step,
//! matching `while elapsed <= end_time`. Consequences:
//!
//! - At least one step always runs, even when `end_time < dt`
//! - The step count equals `floor(end_time / dt) + 1`
//! - The final elapsed time may exceed `end_time` by up to one step
//!
//! # Characteristics
//!
//! - **Order**: first-order accurate in space and time
//! - **Stability**: conditional, Courant number at most 1
//! - **Complexity**: one matrix-vector product per step
//! - **Determinism**: a pure fixed-point iteration of a linear map, no
//!   randomness and no I/O inside the loop

use crate::solver;
use crate::solver::{
    Scenario, SimulationResult, Solver, SolverConfiguration, TransportOperator,
};

// =================================================================================================
// Upwind Solver
// =================================================================================================

/// First-order upwind advection solver
///
/// Assembles the transport operator for the scenario and applies it
/// repeatedly until the configured horizon is passed.
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::{ConcentrationProfile, Grid, VelocityField};
/// use advect_rs::solver::{
///     BoundaryPolicy, Scenario, Solver, SolverConfiguration, UpwindSolver,
/// };
///
/// # fn main() -> Result<(), String> {
/// let grid = Grid::new(100.0, 20.0)?;
/// let velocity = VelocityField::uniform(&grid, 5.0)?;
/// let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
/// let scenario = Scenario::new(grid, velocity, initial, BoundaryPolicy::Frozen);
///
/// let result = UpwindSolver::new().solve(&scenario, &SolverConfiguration::until(60.0))?;
///
/// assert_eq!(result.time_step, 4.0);
/// assert_eq!(result.steps, 16); // floor(60 / 4) + 1
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UpwindSolver;

impl UpwindSolver {
    /// Create a new upwind solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for UpwindSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        // ====== Step 2: Operator Assembly ======

        let operator = match config.time_step {
            Some(dt) => TransportOperator::assemble_with_dt(
                &scenario.grid,
                &scenario.velocity,
                dt,
                scenario.boundary,
            )?,
            None => {
                TransportOperator::assemble(&scenario.grid, &scenario.velocity, scenario.boundary)?
            }
        };

        // A Courant number above 1 means the scheme would amplify instead
        // of transport. Marching it anyway produces divergent output, so
        // this is a hard error, not a warning.
        if !operator.is_stable() {
            return Err(format!(
                "Maximum Courant number {:.6} exceeds 1: time step {} s is too large \
                 for spacing {} m and maximum velocity {} m/s",
                operator.max_courant(),
                operator.time_step(),
                scenario.grid.spacing(),
                scenario.velocity.max()
            ));
        }
        if operator.max_courant() > 1.0 {
            // Within tolerance of 1 but numerically above it
            log::warn!(
                "Maximum Courant number {} is marginally above 1",
                operator.max_courant()
            );
        }

        let dt = operator.time_step();

        // ====== Step 3: Setup ======

        let mut current = scenario.initial.clone();

        // Steps taken: floor(end_time / dt) + 1 by the loop contract
        let expected_steps = (config.end_time / dt).floor() as usize + 1;

        let mut time_points = Vec::with_capacity(expected_steps + 1);
        let mut trajectory = Vec::with_capacity(expected_steps + 1);

        // Store initial condition
        time_points.push(0.0);
        trajectory.push(current.clone());

        // ====== Step 4: Time Marching ======

        let mut steps: usize = 0;
        let mut elapsed = 0.0;

        while elapsed <= config.end_time {
            // Advance one step: a fresh snapshot, the old one is dropped
            current = operator.apply(&current);
            steps += 1;

            // Compute the time point directly from the step index rather
            // than accumulating `elapsed += dt`. Accumulation drifts by
            // O(steps * epsilon) because dt is usually not representable
            // exactly in binary; the direct product keeps the final time
            // within machine epsilon.
            elapsed = steps as f64 * dt;

            trajectory.push(current.clone());
            time_points.push(elapsed);

            solver::validate_profile(&current, steps)?;
        }

        // ====== Step 5: Build Result ======

        let mut result = SimulationResult::new(
            time_points,
            trajectory,
            current,
            dt,
            operator.max_courant(),
        );

        result.add_metadata("solver", self.name());
        result.add_metadata("steps", &steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("end time", &config.end_time.to_string());
        result.add_metadata("boundary policy", operator.boundary().name());
        result.add_metadata("max courant", &operator.max_courant().to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Upwind Advection"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
