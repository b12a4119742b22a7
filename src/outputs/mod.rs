//! Output generation for a digest run.
//!
//! The display layer proper (windowing, rendering) lives outside this crate;
//! what ships here is the structured JSON artifact it consumes, one file per
//! run date.

pub mod json;
