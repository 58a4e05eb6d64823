//! Scan Coordinator
//!
//! Fans candidate filenames out to a fixed pool of worker threads.
//!
//! ## Flow
//! ```text
//!   filenames ──► bounded queue ──► worker 1 ─┐
//!                     │         ──► worker 2 ─┼──► Aggregator
//!                     │         ──► worker N ─┘
//!                     ▼
//!             completion barrier (one count per submitted file)
//! ```
//!
//! Every queued task carries a clone of a `WaitGroup`; a worker drops it once
//! the file is done (accepted, filtered out, or skipped), so the coordinator's
//! `wait()` returns exactly when every submitted file has been handled. The
//! workers are then joined before `run` returns.

use std::thread;

use crossbeam::channel::{bounded, Receiver};
use crossbeam::sync::WaitGroup;

use crate::aggregate::Aggregator;
use crate::config::Config;
use crate::error::{CapIndexError, Result};

use super::filter::FileFilter;
use super::scanner::IndexScanner;

/// Counters describing one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Filenames placed on the queue
    pub files_submitted: u64,
    /// Rejected by the filename/time filter (never opened)
    pub files_filtered: u64,
    /// Fully scanned and merged
    pub files_scanned: u64,
    /// Opened but skipped (bad table, bad version record, read error)
    pub files_skipped: u64,
    /// Entries decoded into a metric across all scanned files
    pub records_decoded: u64,
    /// Entries skipped across all scanned files
    pub records_skipped: u64,
}

impl ScanStats {
    fn absorb(&mut self, other: &ScanStats) {
        self.files_submitted += other.files_submitted;
        self.files_filtered += other.files_filtered;
        self.files_scanned += other.files_scanned;
        self.files_skipped += other.files_skipped;
        self.records_decoded += other.records_decoded;
        self.records_skipped += other.records_skipped;
    }
}

/// One unit of work: a filename plus its completion signal
struct FileTask {
    filename: String,
    done: WaitGroup,
}

/// Runs the worker pool for a single summary run
pub struct ScanCoordinator<'a> {
    config: &'a Config,
    aggregator: &'a Aggregator,
}

impl<'a> ScanCoordinator<'a> {
    pub fn new(config: &'a Config, aggregator: &'a Aggregator) -> Self {
        Self { config, aggregator }
    }

    /// Process every filename, blocking until all of them are done
    ///
    /// Per-file failures never surface here; only a failure to start the
    /// worker threads is an error.
    pub fn run<I>(&self, filenames: I) -> Result<ScanStats>
    where
        I: IntoIterator<Item = String>,
    {
        let filter = FileFilter::new(self.config.window);
        let scanner = IndexScanner::new(self.config, self.aggregator);

        thread::scope(|scope| -> Result<ScanStats> {
            // Channel lives inside the scope: an early return drops the sender
            // and lets already spawned workers drain and exit.
            let (sender, receiver) = bounded::<FileTask>(self.config.queue_capacity);

            let mut handles = Vec::with_capacity(self.config.workers);
            for id in 0..self.config.workers {
                let receiver = receiver.clone();
                let filter = &filter;
                let scanner = &scanner;
                let handle = thread::Builder::new()
                    .name(format!("scan-worker-{}", id))
                    .spawn_scoped(scope, move || worker_loop(receiver, filter, scanner))?;
                handles.push(handle);
            }
            drop(receiver);

            let barrier = WaitGroup::new();
            let mut submitted = 0u64;
            for filename in filenames {
                let task = FileTask {
                    filename,
                    done: barrier.clone(),
                };
                if sender.send(task).is_err() {
                    return Err(CapIndexError::Storage(
                        "all scan workers exited early".to_string(),
                    ));
                }
                submitted += 1;
            }
            drop(sender);

            barrier.wait();

            let mut stats = ScanStats {
                files_submitted: submitted,
                ..ScanStats::default()
            };
            for handle in handles {
                match handle.join() {
                    Ok(worker_stats) => stats.absorb(&worker_stats),
                    Err(_) => tracing::error!("Scan worker panicked"),
                }
            }

            tracing::debug!(?stats, "Scan finished");
            Ok(stats)
        })
    }
}

/// Pull tasks until the queue is closed and drained
fn worker_loop(receiver: Receiver<FileTask>, filter: &FileFilter, scanner: &IndexScanner) -> ScanStats {
    let mut stats = ScanStats::default();

    for task in receiver.iter() {
        process(&task.filename, filter, scanner, &mut stats);
        drop(task.done);
    }

    stats
}

fn process(filename: &str, filter: &FileFilter, scanner: &IndexScanner, stats: &mut ScanStats) {
    if !filter.accepts(filename) {
        tracing::trace!(file = %filename, "Filtered out");
        stats.files_filtered += 1;
        return;
    }

    match scanner.scan_file(filename) {
        Ok(file) => {
            stats.files_scanned += 1;
            stats.records_decoded += file.records_decoded;
            stats.records_skipped += file.records_skipped;
        }
        Err(e) => {
            tracing::debug!(file = %filename, error = %e, "Skipping index file");
            stats.files_skipped += 1;
        }
    }
}
