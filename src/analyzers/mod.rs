//! The pure aggregation stages of the dashboard pipeline.
//!
//! Each stage takes an immutable record slice and returns fresh derived
//! values; nothing here touches shared state, so every stage can be re-run
//! on any input change (new fetch, time-range change, selection change).

pub mod filter;
pub mod rank;
pub mod series;
pub mod table;
pub mod types;
