//! Output module for simulation results
//!
//! This module provides tools to output simulation results in various
//! formats:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── profile_plots.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use advect_rs::output::visualization::{plot_result, PlotConfig};
//!
//! // Initial and final profile on one chart
//! plot_result(&grid, &result, "profiles.png", None)?;
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use advect_rs::output::export::export_result_csv;
//!
//! export_result_csv(&grid, &result, "profiles.csv", None)?;
//! ```
//!
//! # Design Philosophy
//!
//! The simulation core never touches the filesystem; everything here is a
//! consumer of grid, velocity, and concentration snapshots. Presentation
//! choices (colors, labels, precision) stay on this side of the boundary.

pub mod visualization;
pub mod export;

// Re-export commonly used items for convenience
pub use visualization::{
    plot_profile,
    plot_profiles,
    plot_result,
    plot_velocity,
    PlotConfig,
};

pub use export::{
    export_profiles_csv,
    export_result_csv,
    CsvConfig,
};
