//! Cooling curve fitting.
//!
//! Responsibilities:
//!
//! - locate the cooling phase in a series (`phase`)
//! - search the decay rate minimizing squared error (`search`, `fitter`)
//! - choose between the fitted and the manual rate (`selection`)

pub mod fitter;
pub mod phase;
pub mod search;
pub mod selection;

pub use fitter::*;
pub use phase::*;
pub use search::*;
pub use selection::*;
