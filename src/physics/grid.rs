//! Spatial grid for the river reach
//!
//! The reach is discretized into evenly spaced nodes `0, dx, 2dx, …` up to
//! (not exceeding) the domain length. The grid is immutable and lives for
//! the whole simulation run.

use nalgebra::DVector;

/// Evenly spaced node positions along the reach
///
/// # Invariants
///
/// - Positions are strictly increasing with uniform spacing
/// - At least 2 nodes (the transport operator needs an interior)
///
/// # Node Count Convention
///
/// `len() == floor(length / spacing) + 1`. A 5000 m reach with 20 m
/// spacing yields exactly 251 nodes at 0, 20, …, 5000.
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::Grid;
///
/// let grid = Grid::new(5000.0, 20.0).unwrap();
/// assert_eq!(grid.len(), 251);
/// assert_eq!(grid.position(1), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Node positions [m]
    positions: DVector<f64>,

    /// Node spacing dx [m]
    spacing: f64,

    /// Domain length L [m]
    length: f64,
}

impl Grid {
    /// Build a grid from a domain length and a node spacing
    ///
    /// # Errors
    ///
    /// Fails fast on non-positive or non-finite inputs, and when the
    /// spacing exceeds the length (which would leave a single node and no
    /// interior to transport through).
    ///
    /// # Example
    ///
    /// ```rust
    /// use advect_rs::physics::Grid;
    ///
    /// let grid = Grid::new(100.0, 20.0).unwrap();
    /// assert_eq!(grid.len(), 6);
    ///
    /// assert!(Grid::new(100.0, 0.0).is_err());
    /// assert!(Grid::new(-1.0, 20.0).is_err());
    /// ```
    pub fn new(length: f64, spacing: f64) -> Result<Self, String> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(format!("Grid spacing must be positive, got {}", spacing));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(format!("Domain length must be positive, got {}", length));
        }

        // Node count: floor(L/dx) + 1, positions never exceed L
        let nodes = (length / spacing).floor() as usize + 1;

        if nodes < 2 {
            return Err(format!(
                "Grid needs at least 2 nodes, got {} (length {} with spacing {})",
                nodes, length, spacing
            ));
        }

        let positions = DVector::from_fn(nodes, |i, _| i as f64 * spacing);

        Ok(Self {
            positions,
            spacing,
            length,
        })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// A grid is never empty; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Node spacing dx [m]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Domain length L [m]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Position of node `i` [m]
    pub fn position(&self, i: usize) -> f64 {
        self.positions[i]
    }

    /// All node positions
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// First and last node position [m]
    pub fn span(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }
}

// =================================================================================================
// Tests
// =================================================================================================
