//! Data export for external analysis
//!
//! CSV is the only format for now; it loads directly into spreadsheets,
//! pandas, or MATLAB for downstream processing.

mod csv;

pub use csv::{export_profiles_csv, export_result_csv, CsvConfig};
