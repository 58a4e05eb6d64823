//! Aggregate Module
//!
//! Shared accumulation of decoded metrics and rendering of the final summary.
//!
//! ## Responsibilities
//! - Thread-safe increment-or-insert counters for the four key categories
//! - Running total of companion capture-file sizes
//! - Point-in-time snapshot, copied under read locks
//! - Deterministic JSON rendering of a snapshot
//!
//! ## Concurrency
//! Each category map sits behind its own `parking_lot::RwLock`, so workers
//! updating different categories never contend. Additions commute, which makes
//! the final state independent of scheduling order.
//!
//! ## Scan path
//! Scanners do not call the per-record `add_*` operations or
//! [`Aggregator::apply`]. Each file is counted into a private [`Tally`] and
//! folded in with [`Aggregator::merge`] once the file was read completely, so
//! a file that fails midway leaves no partial counts behind. Both paths share
//! one increment-or-insert helper, so a tally merged in and the same metrics
//! applied one by one produce identical state. The companion file size still
//! goes through [`Aggregator::add_size`].

mod aggregator;
mod report;

pub use aggregator::{Aggregator, Tally};
pub use report::Snapshot;
