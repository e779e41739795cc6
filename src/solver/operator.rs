//! Upwind transport operator
//!
//! # Mathematical Background
//!
//! First-order upwind advection discretizes `∂C/∂t = -u ∂C/∂x` on a
//! uniform grid as:
//!
//! ```text
//! C_new[i] = (1 - courant[i]) * C[i] + courant[i] * C[i-1]
//! ```
//!
//! with `courant[i] = u[i] * dt / dx`. The new concentration at a node is
//! a convex combination of its old value and the upstream neighbour's old
//! value, weighted by how far the flow advances that node's material in
//! one time step. Collected over all nodes this is a sparse N×N linear
//! map with nonzeros only on the diagonal and sub-diagonal, plus the
//! boundary rows.
//!
//! # Stability
//!
//! The scheme is stable while `courant[i] ≤ 1` everywhere. The derived
//! step `dt = dx / max(velocity)` makes the worst node exactly 1; at a
//! Courant number of exactly 1 the scheme degenerates to an exact
//! one-node shift with no numerical diffusion.

use crate::physics::{ConcentrationProfile, Grid, VelocityField};
use crate::solver::parallel_threshold;
use nalgebra::{DMatrix, DVector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Slack allowed on the Courant bound before an operator is rejected
///
/// Covers rounding in `dt * u / dx` when dt itself was derived from the
/// same quantities.
pub const COURANT_TOLERANCE: f64 = 1e-12;

// =================================================================================================
// Boundary Policy
// =================================================================================================

/// Treatment of the first and last grid node
///
/// The upwind stencil needs an upstream neighbour, which the edge nodes
/// lack. Neither choice below conserves mass exactly at the edges; the
/// policy is therefore an explicit, mandatory part of the scenario rather
/// than a hidden default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// All-zero boundary rows: no inflow enters the domain
    ///
    /// The edge nodes flush to zero after the first step and stay there.
    /// Interior mass can only leave through the downstream edge.
    Frozen,

    /// Identity boundary rows: the edge value passes through unchanged
    ///
    /// Equivalent to a zero-gradient (open) boundary. The edge nodes keep
    /// their initial value for the whole run.
    PassThrough,
}

impl BoundaryPolicy {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            BoundaryPolicy::Frozen => "Frozen",
            BoundaryPolicy::PassThrough => "PassThrough",
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Transport Operator
// =================================================================================================

/// The linear map advancing a concentration profile by one time step
///
/// Derived deterministically from grid spacing, velocity field, and time
/// step; recompute it whenever any of those change.
#[derive(Debug, Clone)]
pub struct TransportOperator {
    /// Dense storage of the logically tridiagonal-pattern matrix
    matrix: DMatrix<f64>,

    /// Per-node Courant number `u[i] * dt / dx`
    courant: DVector<f64>,

    /// Time step the operator advances per application [s]
    time_step: f64,

    /// Largest per-node Courant number
    max_courant: f64,

    /// Boundary treatment baked into the first and last row
    boundary: BoundaryPolicy,
}

impl TransportOperator {
    /// Assemble the operator with the derived stable time step
    ///
    /// Uses `dt = dx / max(velocity)`, which pins the fastest node at a
    /// Courant number of exactly 1 and every other node at or below it.
    ///
    /// # Errors
    ///
    /// - Fewer than 2 nodes (no interior row exists)
    /// - Velocity length does not match the grid
    /// - `max(velocity) <= 0` (the stable step is undefined)
    ///
    /// # Example
    ///
    /// ```rust
    /// use advect_rs::physics::{Grid, VelocityField};
    /// use advect_rs::solver::{BoundaryPolicy, TransportOperator};
    ///
    /// # fn main() -> Result<(), String> {
    /// let grid = Grid::new(100.0, 20.0)?;
    /// let velocity = VelocityField::uniform(&grid, 5.0)?;
    ///
    /// let operator = TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen)?;
    /// assert_eq!(operator.time_step(), 4.0);
    /// assert_eq!(operator.max_courant(), 1.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn assemble(
        grid: &Grid,
        velocity: &VelocityField,
        boundary: BoundaryPolicy,
    ) -> Result<Self, String> {
        let u_max = velocity.max();
        if u_max <= 0.0 {
            return Err(format!(
                "Cannot derive a time step: maximum velocity is {}",
                u_max
            ));
        }
        Self::assemble_with_dt(grid, velocity, grid.spacing() / u_max, boundary)
    }

    /// Assemble the operator with an externally chosen time step
    ///
    /// Accepts any positive step, including one that violates the Courant
    /// bound: representing the unstable operator is what lets the marching
    /// engine refuse it with a diagnostic instead of integrating garbage.
    /// Check [`is_stable`](Self::is_stable) before applying repeatedly.
    pub fn assemble_with_dt(
        grid: &Grid,
        velocity: &VelocityField,
        time_step: f64,
        boundary: BoundaryPolicy,
    ) -> Result<Self, String> {
        let n = grid.len();

        if n < 2 {
            return Err(format!(
                "Transport operator needs at least 2 nodes, got {}",
                n
            ));
        }
        if velocity.len() != n {
            return Err(format!(
                "Velocity field has {} values for {} grid nodes",
                velocity.len(),
                n
            ));
        }
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(format!("Time step must be positive, got {}", time_step));
        }

        // ====== Per-node Courant numbers ======

        let dx = grid.spacing();
        let courant: DVector<f64>;

        if n > parallel_threshold() {
            #[cfg(feature = "parallel")]
            {
                courant = DVector::from_vec(
                    velocity
                        .values()
                        .as_slice()
                        .par_iter()
                        .map(|&u| time_step * u / dx)
                        .collect(),
                );
            }
            #[cfg(not(feature = "parallel"))]
            {
                courant = velocity.values().map(|u| time_step * u / dx);
            }
        } else {
            courant = velocity.values().map(|u| time_step * u / dx);
        }

        let max_courant = courant.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // ====== Assemble the matrix ======

        let mut matrix = DMatrix::zeros(n, n);

        // Interior rows: convex combination of own and upstream value
        for i in 1..n - 1 {
            matrix[(i, i)] = 1.0 - courant[i];
            matrix[(i, i - 1)] = courant[i];
        }

        // Boundary rows
        match boundary {
            BoundaryPolicy::Frozen => {
                // Rows 0 and n-1 stay all-zero
            }
            BoundaryPolicy::PassThrough => {
                matrix[(0, 0)] = 1.0;
                matrix[(n - 1, n - 1)] = 1.0;
            }
        }

        Ok(Self {
            matrix,
            courant,
            time_step,
            max_courant,
            boundary,
        })
    }

    /// Advance a concentration profile by one time step
    ///
    /// Pure function: the input profile is untouched and a fresh snapshot
    /// is returned.
    pub fn apply(&self, profile: &ConcentrationProfile) -> ConcentrationProfile {
        ConcentrationProfile::new(&self.matrix * profile.values())
    }

    /// Time step advanced per application [s]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Per-node Courant numbers
    pub fn courant(&self) -> &DVector<f64> {
        &self.courant
    }

    /// Largest per-node Courant number
    pub fn max_courant(&self) -> f64 {
        self.max_courant
    }

    /// Whether the Courant bound holds (within [`COURANT_TOLERANCE`])
    pub fn is_stable(&self) -> bool {
        self.max_courant <= 1.0 + COURANT_TOLERANCE
    }

    /// Boundary treatment baked into the edge rows
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Number of nodes the operator acts on
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// An assembled operator is never empty; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// The assembled matrix
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_setup() -> (Grid, VelocityField) {
        let grid = Grid::new(100.0, 20.0).unwrap();
        let velocity = VelocityField::uniform(&grid, 5.0).unwrap();
        (grid, velocity)
    }

    // ====== Time step derivation ======

    #[test]
    fn test_derived_time_step() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        // dt = dx / max(u) = 20 / 5
        assert_relative_eq!(operator.time_step(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(operator.max_courant(), 1.0, epsilon = 1e-12);
        assert!(operator.is_stable());
    }

    #[test]
    fn test_courant_per_node() {
        // Varying velocity: the fastest node sits at exactly 1
        let grid = Grid::new(100.0, 20.0).unwrap();
        let velocity = VelocityField::from_function(&grid, |x| 1.0 + x / 25.0).unwrap();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        assert_relative_eq!(operator.max_courant(), 1.0, epsilon = 1e-12);
        for i in 0..operator.len() {
            assert!(operator.courant()[i] <= 1.0 + COURANT_TOLERANCE);
            assert_relative_eq!(
                operator.courant()[i],
                operator.time_step() * velocity.get(i) / grid.spacing(),
                epsilon = 1e-12
            );
        }
    }

    // ====== Matrix structure ======

    #[test]
    fn test_interior_rows_are_complement_pairs() {
        let grid = Grid::new(100.0, 20.0).unwrap();
        let velocity = VelocityField::from_function(&grid, |x| 2.0 + x / 50.0).unwrap();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        let m = operator.matrix();
        let n = operator.len();

        for i in 1..n - 1 {
            let c = operator.courant()[i];
            assert_relative_eq!(m[(i, i)], 1.0 - c, epsilon = 1e-12);
            assert_relative_eq!(m[(i, i - 1)], c, epsilon = 1e-12);

            // Everything else in the row is zero
            for j in 0..n {
                if j != i && j != i - 1 {
                    assert_eq!(m[(i, j)], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_frozen_boundary_rows_are_zero() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        let m = operator.matrix();
        let n = operator.len();
        for j in 0..n {
            assert_eq!(m[(0, j)], 0.0);
            assert_eq!(m[(n - 1, j)], 0.0);
        }
    }

    #[test]
    fn test_pass_through_boundary_rows_are_identity() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::PassThrough).unwrap();

        let m = operator.matrix();
        let n = operator.len();
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(n - 1, n - 1)], 1.0);
        for j in 1..n {
            assert_eq!(m[(0, j)], 0.0);
        }
        for j in 0..n - 1 {
            assert_eq!(m[(n - 1, j)], 0.0);
        }
    }

    // ====== Application ======

    #[test]
    fn test_unit_courant_shifts_one_node() {
        // Courant exactly 1 is the exact-shift case: no numerical diffusion
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::PassThrough).unwrap();

        let before = ConcentrationProfile::from_vec(vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let after = operator.apply(&before);

        let expected = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        for (i, &value) in expected.iter().enumerate() {
            assert_relative_eq!(after.get(i), value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_frozen_boundary_flushes_edges() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        let before = ConcentrationProfile::from_vec(vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let after = operator.apply(&before);

        assert_eq!(after.get(0), 0.0);
        assert_eq!(after.get(5), 0.0);
        // Interior at Courant 1 takes the upstream value
        for i in 1..5 {
            assert_relative_eq!(after.get(i), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap();

        let before = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
        let copy = before.clone();
        let _after = operator.apply(&before);

        assert_eq!(before, copy);
    }

    #[test]
    fn test_sub_unit_courant_is_convex_combination() {
        let (grid, velocity) = uniform_setup();
        // dt = 2 gives courant 0.5 everywhere
        let operator =
            TransportOperator::assemble_with_dt(&grid, &velocity, 2.0, BoundaryPolicy::Frozen)
                .unwrap();

        let before = ConcentrationProfile::from_vec(vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let after = operator.apply(&before);

        assert_relative_eq!(after.get(1), 0.5, epsilon = 1e-12);
        assert_relative_eq!(after.get(2), 0.5, epsilon = 1e-12);
        assert_relative_eq!(after.total_mass(), 1.0, epsilon = 1e-12);
    }

    // ====== Stability ======

    #[test]
    fn test_oversized_step_is_unstable() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble_with_dt(&grid, &velocity, 8.0, BoundaryPolicy::Frozen)
                .unwrap();

        assert_relative_eq!(operator.max_courant(), 2.0, epsilon = 1e-12);
        assert!(!operator.is_stable());
    }

    #[test]
    fn test_smaller_step_is_stable() {
        let (grid, velocity) = uniform_setup();
        let operator =
            TransportOperator::assemble_with_dt(&grid, &velocity, 1.0, BoundaryPolicy::Frozen)
                .unwrap();

        assert_relative_eq!(operator.max_courant(), 0.25, epsilon = 1e-12);
        assert!(operator.is_stable());
    }

    // ====== Validation ======

    #[test]
    fn test_velocity_length_mismatch_failed() {
        let grid = Grid::new(100.0, 20.0).unwrap();
        let other_grid = Grid::new(200.0, 20.0).unwrap();
        let velocity = VelocityField::uniform(&other_grid, 5.0).unwrap();

        let result = TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("grid nodes"));
    }

    #[test]
    fn test_invalid_time_step_failed() {
        let (grid, velocity) = uniform_setup();

        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result =
                TransportOperator::assemble_with_dt(&grid, &velocity, dt, BoundaryPolicy::Frozen);
            assert!(result.is_err(), "dt = {} should be rejected", dt);
        }
    }

    #[test]
    fn test_boundary_policy_names() {
        assert_eq!(BoundaryPolicy::Frozen.name(), "Frozen");
        assert_eq!(format!("{}", BoundaryPolicy::PassThrough), "PassThrough");
    }

    // ====== Parallel threshold interaction ======

    #[test]
    fn test_assembly_below_and_above_threshold_agree() {
        // Force the parallel path (when compiled in) onto a small grid and
        // compare against the sequential result.
        let grid = Grid::new(1000.0, 10.0).unwrap();
        let velocity = VelocityField::from_function(&grid, |x| 1.0 + (x / 200.0).sin().abs()).unwrap();

        let sequential = {
            let _guard = crate::solver::ThresholdGuard::save(usize::MAX);
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap()
        };
        let small_threshold = {
            let _guard = crate::solver::ThresholdGuard::save(1);
            TransportOperator::assemble(&grid, &velocity, BoundaryPolicy::Frozen).unwrap()
        };

        for i in 0..sequential.len() {
            assert_relative_eq!(
                sequential.courant()[i],
                small_threshold.courant()[i],
                epsilon = 1e-15
            );
        }
    }
}
