//! Structured diagnostics for map extraction runs.
//!
//! These types are serialisable with `serde` and are returned by
//! [`process_with_diagnostics`](crate::MapExtractor::process_with_diagnostics)
//! and written by the CLI as JSON reports.

pub mod pipeline;
pub mod summary;
pub mod timing;

pub use pipeline::{InputDescriptor, MapsReport, MapsTrace};
pub use summary::MapSummary;
pub use timing::{StageTiming, TimingBreakdown};
