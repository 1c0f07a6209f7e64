//! Utility modules for the datasources console.
//!
//! Small pure helpers shared by the data model and the command-line front end.
//!
//! # Available Utilities
//!
//! - [`time`] - Conversion between durations in seconds and hour/minute/second parts
//! - [`ident`] - Derivation of data source identifiers from display names

pub mod ident;
pub mod time;
