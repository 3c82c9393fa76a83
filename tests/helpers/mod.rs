//! Test helpers module
//!
//! Request fixtures and a test context that wires services over either
//! in-memory collections or JSON files in a temporary directory.

#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
