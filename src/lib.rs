//! advect-rs: 1D River Advection Simulation Framework
//!
//! Simulates the transport of a dissolved tracer along a river reach using
//! a first-order upwind finite-difference scheme. Built with Rust for
//! performance and safety.
//!
//! # Architecture
//!
//! advect-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physics types describe the reach (grid, velocity, concentration)
//!    - The solver assembles the transport operator and marches it in time
//!
//! 2. **Explicit state passing**
//!    - Every time step maps an immutable concentration profile to a new
//!      one, so intermediate snapshots come for free
//!
//! # Quick Start
//!
//! ```rust
//! use advect_rs::physics::{Grid, VelocityField, ConcentrationProfile};
//! use advect_rs::solver::{Scenario, SolverConfiguration, UpwindSolver, Solver, BoundaryPolicy};
//!
//! # fn main() -> Result<(), String> {
//! // 1. Describe the reach
//! let grid = Grid::new(5000.0, 20.0)?;                 // 5 km, 20 m spacing
//! let velocity = VelocityField::from_function(&grid, |x| (x / 100.0 + 600.0).sin() + 5.0)?;
//! let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1e-7);
//!
//! // 2. Define the scenario and the horizon
//! let scenario = Scenario::new(grid, velocity, initial, BoundaryPolicy::Frozen);
//! let config = SolverConfiguration::until(600.0);      // 10 minutes
//!
//! // 3. Run the simulation
//! let solver = UpwindSolver::new();
//! let result = solver.solve(&scenario, &config)?;
//!
//! // 4. Access results
//! println!("Reached t = {} s in {} steps", result.elapsed, result.steps);
//! println!("Max Courant number: {}", result.max_courant);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Reach description (grid, velocity field, concentration)
//! - [`solver`]: Transport operator assembly and time marching
//! - [`output`]: Result visualization and export

// Core modules
pub mod physics;
pub mod solver;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use advect_rs::prelude::*;
    //! ```
    pub use crate::physics::{ConcentrationProfile,
                             Grid,
                             Segment,
                             SegmentSource,
                             TableSource,
                             VelocityField};
    pub use crate::solver::{BoundaryPolicy,
                            Scenario,
                            SimulationResult,
                            Solver,
                            SolverConfiguration,
                            TransportOperator,
                            UpwindSolver};
}
