//! Visualization of grids, velocity fields, and concentration profiles
//!
//! Static images only: spatial profile plots (concentration against
//! distance) and velocity plots, written as PNG or SVG depending on the
//! file extension.

mod config;
mod profile_plots;

pub use config::PlotConfig;
pub use profile_plots::{plot_profile, plot_profiles, plot_result, plot_velocity};
