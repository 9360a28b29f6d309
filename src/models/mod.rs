//! Cooling model implementation.
//!
//! The model is a small, pure function so that fitting and projection code
//! can share it.

pub mod model;

pub use model::*;
