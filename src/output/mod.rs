//! Output formatting: console text, CSV export and JSON reports

pub mod csv;
pub mod json;
pub mod text;
