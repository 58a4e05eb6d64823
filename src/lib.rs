//! # capindex
//!
//! Summarizes packet-capture index files:
//! - Decodes protocol, port and address keys into typed metrics
//! - Scans many time-windowed index files concurrently
//! - Accumulates per-key packet counts and total capture size
//! - Renders a deterministic, sorted JSON summary
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Summarizer (engine)                      │
//! │                (lists IDX0/, owns the run)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ filenames
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Scan Coordinator                           │
//! │          (bounded queue, N workers, barrier)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ File Filter │          │  Scanner    │──► TableReader (IDX0/<name>)
//!   │ (name/time) │          │  + Decoder  │──► stat PKT0/<name>
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Aggregator  │
//!                           │  (RwLocks)  │
//!                           └──────┬──────┘
//!                                  ▼
//!                             Snapshot → JSON
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod key;
pub mod aggregate;
pub mod scan;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CapIndexError, Result};
pub use config::{Config, TimeWindow};
pub use aggregate::{Aggregator, Snapshot};
pub use engine::{Summarizer, Summary};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of capindex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
