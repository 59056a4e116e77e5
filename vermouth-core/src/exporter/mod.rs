//! Output formats for change sets.
//!
//! - `report`: the plain-text compatibility report
//! - `json`: verdict, summary counts and the change set as JSON

pub mod json;
pub mod report;

pub use report::render;
