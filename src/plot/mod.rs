//! Terminal plotting: axis bounds and the ASCII renderer.

pub mod ascii;
pub mod bounds;

pub use ascii::*;
pub use bounds::*;
