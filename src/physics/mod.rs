//! Reach description
//!
//! This module provides the data model of the simulated river reach.
//! Everything here is immutable once built and carries no numerics; the
//! solver module consumes these types to assemble and march the transport
//! operator.
//!
//! # Core Concepts
//!
//! - **Grid**: ordered, evenly spaced node positions along the reach
//! - **Velocity Field**: one flow velocity per node, from a closed-form
//!   function or from externally supplied piecewise-constant segments
//! - **Concentration Profile**: tracer concentration snapshot, one value
//!   per node
//!
//! # Example
//!
//! ```rust
//! use advect_rs::physics::{Grid, VelocityField, ConcentrationProfile};
//!
//! # fn main() -> Result<(), String> {
//! let grid = Grid::new(100.0, 20.0)?;
//! let velocity = VelocityField::uniform(&grid, 5.0)?;
//! let initial = ConcentrationProfile::pulse(&grid, 40.0, 100.0, 1.0);
//!
//! assert_eq!(grid.len(), 6);
//! assert_eq!(velocity.len(), 6);
//! assert_eq!(initial.len(), 6);
//! # Ok(())
//! # }
//! ```

// module declaration
pub mod grid;
pub mod velocity;
pub mod profile;

// re-export commonly used types for convenience
pub use grid::Grid;
pub use velocity::{Segment,
                   SegmentSource,
                   TableSource,
                   VelocityField};
pub use profile::ConcentrationProfile;
