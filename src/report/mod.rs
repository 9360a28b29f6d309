//! Reporting utilities: run summaries, tables, and point labels.

pub mod format;

pub use format::*;
