//! Operator data: the observation series, the planned schedule, and
//! synthetic firings for demos.

pub mod sample;
pub mod schedule;
pub mod series;

pub use sample::{SampleConfig, SampleData, generate_firing};
pub use schedule::Schedule;
pub use series::SeriesStore;
