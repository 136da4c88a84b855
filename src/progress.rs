//! Progress reporting and cancellation for parsing.
//!
//! Parsers push [`ParseProgress`] snapshots to a caller-supplied callback.
//! Every report is also a cancellation point: if the caller has set the
//! [`CancellationToken`], the parser stops at that tick with
//! [`ChatpulseError::Cancelled`].
//!
//! # Example
//!
//! ```rust
//! use chatpulse::progress::{ParseProgress, ProgressCallback, ProgressReporter};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let callback: ProgressCallback = Arc::new(move |p: ParseProgress| {
//!     sink.lock().unwrap().push(p.percentage);
//! });
//!
//! let reporter = ProgressReporter::new(callback);
//! reporter.report(50, 200).unwrap();
//! reporter.report(200, 200).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![25, 100]);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::{ChatpulseError, Result};

/// A transient progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ParseProgress {
    /// Units processed so far (lines for TXT, 100 for structured formats).
    pub current: usize,

    /// Total units.
    pub total: usize,

    /// `round(current / total * 100)`; 100 when `total` is zero.
    pub percentage: u8,
}

impl ParseProgress {
    /// Creates a snapshot and computes its percentage.
    ///
    /// ```rust
    /// use chatpulse::progress::ParseProgress;
    ///
    /// assert_eq!(ParseProgress::new(1, 3).percentage, 33);
    /// assert_eq!(ParseProgress::new(2, 3).percentage, 67);
    /// assert_eq!(ParseProgress::new(0, 0).percentage, 100);
    /// ```
    pub fn new(current: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            100
        } else {
            ((current as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
        };
        Self {
            current,
            total,
            percentage,
        }
    }

    /// Returns whether the operation is complete.
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(ParseProgress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
///
/// ```rust
/// use chatpulse::progress::{stderr_progress, ParseProgress};
///
/// let callback = stderr_progress();
/// // Will print "Progress: 50% (500/1000)" to stderr
/// callback(ParseProgress::new(500, 1000));
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        eprintln!(
            "Progress: {}% ({}/{})",
            progress.percentage, progress.current, progress.total
        );
    })
}

/// Shared flag a caller sets to stop a running parse.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Pairs a progress callback with an optional cancellation token.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: ProgressCallback,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::silent()
    }
}

impl ProgressReporter {
    /// Creates a reporter forwarding to `callback`.
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback,
            cancel: None,
        }
    }

    /// A reporter that discards every snapshot and never cancels.
    pub fn silent() -> Self {
        Self::new(no_progress())
    }

    /// Attaches a cancellation token checked at every report.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Emits a snapshot, then fails if cancellation was requested.
    pub fn report(&self, current: usize, total: usize) -> Result<()> {
        (self.callback)(ParseProgress::new(current, total));
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(ChatpulseError::Cancelled { current, total });
        }
        Ok(())
    }

    /// Emits the single 100% event used by bulk parsers.
    pub fn report_complete(&self) -> Result<()> {
        self.report(100, 100)
    }
}
