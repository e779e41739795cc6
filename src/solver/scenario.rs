//! Simulation scenario definition
//!
//! A scenario combines the reach description with a boundary policy.
use crate::physics::{ConcentrationProfile, Grid, VelocityField};
use crate::solver::BoundaryPolicy;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Grid (node positions)
/// - Velocity field (one value per node)
/// - Initial concentration profile
/// - Boundary policy for the edge nodes
///
/// # Design
///
/// The same scenario can be solved with different configurations (horizon,
/// time step). This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use advect_rs::physics::{ConcentrationProfile, Grid, VelocityField};
/// use advect_rs::solver::{BoundaryPolicy, Scenario};
///
/// # fn main() -> Result<(), String> {
/// let grid = Grid::new(100.0, 20.0)?;
/// let velocity = VelocityField::uniform(&grid, 5.0)?;
/// let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
///
/// let scenario = Scenario::new(grid, velocity, initial, BoundaryPolicy::Frozen);
/// scenario.validate()?;
/// # Ok(())
/// # }
/// ```
pub struct Scenario {
    /// Node positions along the reach
    pub grid: Grid,

    /// Flow velocity at each node
    pub velocity: VelocityField,

    /// Concentration profile at t = 0
    pub initial: ConcentrationProfile,

    /// Treatment of the first and last grid node
    pub boundary: BoundaryPolicy,
}

impl Scenario {
    /// Create a scenario
    pub fn new(
        grid: Grid,
        velocity: VelocityField,
        initial: ConcentrationProfile,
        boundary: BoundaryPolicy,
    ) -> Self {
        Self {
            grid,
            velocity,
            initial,
            boundary,
        }
    }

    /// Verify that the three per-node arrays describe the same grid
    pub fn validate(&self) -> Result<(), String> {
        if self.velocity.len() != self.grid.len() {
            return Err(format!(
                "Velocity field has {} values for {} grid nodes",
                self.velocity.len(),
                self.grid.len()
            ));
        }
        if self.initial.len() != self.grid.len() {
            return Err(format!(
                "Initial profile has {} values for {} grid nodes",
                self.initial.len(),
                self.grid.len()
            ));
        }
        Ok(())
    }

    /// Number of grid nodes
    pub fn nodes(&self) -> usize {
        self.grid.len()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("nodes", &self.nodes())
            .field("spacing", &self.grid.spacing())
            .field("max velocity", &self.velocity.max())
            .field("boundary", &self.boundary)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
