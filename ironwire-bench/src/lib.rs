//! # IronWire Bench
//!
//! Sample schemas and values shared by the IronWire benchmarks.

pub mod fixtures;
