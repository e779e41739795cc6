//! Flow velocity along the reach
//!
//! A velocity field assigns one flow velocity to every grid node. Three
//! sources are supported:
//!
//! - **Uniform**: one value everywhere
//! - **Functional**: a closed-form function of position
//! - **Segmented**: piecewise-constant over position intervals, with the
//!   per-segment values supplied by an external [`SegmentSource`]
//!
//! # Segment Coverage
//!
//! Segments use half-open intervals `[start, end)`. The final segment may
//! use `f64::INFINITY` as its upper bound to cover the remainder of the
//! reach. A node covered by no segment is a construction error, never a
//! silent zero: a zero default would later stall the stability
//! calculation without any visible failure.
//!
//! # Postcondition
//!
//! Every constructor enforces `max(velocity) > 0`. The stable time step is
//! `dx / max(velocity)`, which is undefined otherwise.

use crate::physics::Grid;
use nalgebra::DVector;
use std::collections::HashMap;

// =================================================================================================
// External Segment Data
// =================================================================================================

/// External lookup for per-segment velocity values
///
/// Decouples the core from any specific tabular format or file location.
/// The simulation only needs "given a segment identifier, return a numeric
/// value"; whether that value comes from a spreadsheet, a database, or a
/// test fixture is the caller's concern.
pub trait SegmentSource {
    /// Value for the given segment identifier, if present
    fn value(&self, key: &str) -> Option<f64>;
}

/// In-memory [`SegmentSource`] backed by a key/value table
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::{SegmentSource, TableSource};
///
/// let source = TableSource::from_pairs(&[("upper", 1.0), ("lower", 2.0)]);
/// assert_eq!(source.value("upper"), Some(1.0));
/// assert_eq!(source.value("missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    values: HashMap<String, f64>,
}

impl TableSource {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from identifier/value pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect();
        Self { values }
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }
}

impl SegmentSource for TableSource {
    fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

// =================================================================================================
// Segment
// =================================================================================================

/// One piecewise-constant velocity interval
///
/// Membership is half-open: a position `x` belongs to the segment when
/// `start <= x < end`. The `key` identifies the segment's value in a
/// [`SegmentSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Identifier used to look up the velocity value
    pub key: String,

    /// Lower position bound [m], inclusive
    pub start: f64,

    /// Upper position bound [m], exclusive; may be `f64::INFINITY`
    pub end: f64,
}

impl Segment {
    /// Create a segment covering `[start, end)`
    pub fn new(key: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            key: key.into(),
            start,
            end,
        }
    }

    /// Half-open membership test
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position < self.end
    }
}

// =================================================================================================
// Velocity Field
// =================================================================================================

/// Flow velocity at every grid node [m/s]
///
/// Immutable once built. One value per node, no gaps, strictly positive
/// maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityField {
    /// Per-node velocity [m/s]
    values: DVector<f64>,

    /// Largest velocity over all nodes [m/s]
    max: f64,
}

impl VelocityField {
    /// Spatially uniform velocity
    ///
    /// # Example
    ///
    /// ```rust
    /// use advect_rs::physics::{Grid, VelocityField};
    ///
    /// let grid = Grid::new(100.0, 20.0).unwrap();
    /// let velocity = VelocityField::uniform(&grid, 5.0).unwrap();
    /// assert_eq!(velocity.max(), 5.0);
    /// ```
    pub fn uniform(grid: &Grid, velocity: f64) -> Result<Self, String> {
        Self::from_values(DVector::from_element(grid.len(), velocity))
    }

    /// Velocity as a closed-form function of position
    ///
    /// A bounded oscillation plus a positive offset is the typical shape
    /// here, keeping the flow direction unambiguous:
    ///
    /// ```rust
    /// use advect_rs::physics::{Grid, VelocityField};
    ///
    /// let grid = Grid::new(5000.0, 20.0).unwrap();
    /// let velocity =
    ///     VelocityField::from_function(&grid, |x| (x / 100.0 + 600.0).sin() + 5.0).unwrap();
    /// assert!(velocity.max() > 4.0);
    /// ```
    pub fn from_function<F>(grid: &Grid, f: F) -> Result<Self, String>
    where
        F: Fn(f64) -> f64,
    {
        let values = DVector::from_fn(grid.len(), |i, _| f(grid.position(i)));
        Self::from_values(values)
    }

    /// Piecewise-constant velocity from external segment data
    ///
    /// Segments must be ordered by `start`, must not overlap, and must
    /// together cover every node position. Values come from `source` keyed
    /// by each segment's identifier.
    ///
    /// # Errors
    ///
    /// - A segment with `start >= end` or a non-finite bound
    /// - Segments out of order or overlapping
    /// - A node position covered by no segment
    /// - A segment key missing from the source, or a non-finite value
    /// - `max(velocity) <= 0` after assignment
    ///
    /// # Example
    ///
    /// ```rust
    /// use advect_rs::physics::{Grid, Segment, TableSource, VelocityField};
    ///
    /// let grid = Grid::new(100.0, 20.0).unwrap();
    /// let source = TableSource::from_pairs(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
    /// let segments = [
    ///     Segment::new("a", 0.0, 40.0),
    ///     Segment::new("b", 40.0, 80.0),
    ///     Segment::new("c", 80.0, f64::INFINITY),
    /// ];
    ///
    /// let velocity = VelocityField::from_segments(&grid, &segments, &source).unwrap();
    /// assert_eq!(velocity.get(2), 2.0); // x = 40 falls in [40, 80)
    /// ```
    pub fn from_segments(
        grid: &Grid,
        segments: &[Segment],
        source: &dyn SegmentSource,
    ) -> Result<Self, String> {
        if segments.is_empty() {
            return Err("At least one velocity segment is required".to_string());
        }

        // ====== Validate the segment list ======

        for segment in segments {
            if segment.start.is_nan() || segment.end.is_nan() || segment.start.is_infinite() {
                return Err(format!(
                    "Segment '{}' has non-finite bounds [{}, {})",
                    segment.key, segment.start, segment.end
                ));
            }
            if segment.start >= segment.end {
                return Err(format!(
                    "Segment '{}' is empty or reversed: [{}, {})",
                    segment.key, segment.start, segment.end
                ));
            }
        }

        for pair in segments.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(format!(
                    "Segments '{}' and '{}' overlap or are out of order",
                    pair[0].key, pair[1].key
                ));
            }
        }

        // ====== Resolve segment values through the source ======

        let mut segment_values = Vec::with_capacity(segments.len());
        for segment in segments {
            let value = source.value(&segment.key).ok_or_else(|| {
                format!("No velocity value found for segment '{}'", segment.key)
            })?;
            if !value.is_finite() {
                return Err(format!(
                    "Velocity for segment '{}' is not finite: {}",
                    segment.key, value
                ));
            }
            segment_values.push(value);
        }

        // ====== Assign one value per node, coverage is mandatory ======

        let mut values = DVector::zeros(grid.len());
        for i in 0..grid.len() {
            let x = grid.position(i);
            let covering = segments.iter().position(|segment| segment.contains(x));

            match covering {
                Some(j) => values[i] = segment_values[j],
                None => {
                    return Err(format!(
                        "Node at position {} m is not covered by any velocity segment",
                        x
                    ));
                }
            }
        }

        Self::from_values(values)
    }

    /// Shared postcondition check for all constructors
    fn from_values(values: DVector<f64>) -> Result<Self, String> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Velocity field contains non-finite values".to_string());
        }

        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if max <= 0.0 {
            return Err(format!(
                "Maximum velocity must be strictly positive, got {}. \
                 The stable time step dx / max(velocity) is undefined otherwise.",
                max
            ));
        }

        Ok(Self { values, max })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A validated field is never empty; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Velocity at node `i` [m/s]
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// All per-node velocities
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Largest velocity over all nodes [m/s], strictly positive
    pub fn max(&self) -> f64 {
        self.max
    }
}

// =================================================================================================
// Tests
// =================================================================================================
