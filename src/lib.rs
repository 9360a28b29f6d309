//! `kiln-curves` library crate.
//!
//! Records kiln firing readings, locates the cooling phase, fits an
//! exponential decay rate toward ambient, and projects the cooling curve.
//!
//! The binary (`kiln`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the session model can back other front-ends later

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
pub mod session;
