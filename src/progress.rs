//! Progress reporting for long-running enumerations.
//!
//! The engine itself has no UI; callers that want a progress bar, a log
//! line per batch, or anything else implement [`ProgressSink`] and pass it
//! to the `*_with_progress` entry points. Progress is a pure side channel:
//! nothing a sink does can affect the returned p-values.

/// Observer fed enumeration progress by the test orchestrators.
///
/// After sizing the assignment space, the orchestrator calls
/// [`set_total`](ProgressSink::set_total) once with the number of
/// assignments that will be processed and a human-readable label
/// (`"of 20 permutations"`), then [`advance`](ProgressSink::advance) after
/// each assignment, and finally [`clear`](ProgressSink::clear) when the
/// enumeration completes.
pub trait ProgressSink {
    /// Announce the total number of assignments and a display label.
    fn set_total(&mut self, total: u64, label: &str);

    /// Mark one assignment as processed.
    fn advance(&mut self);

    /// The enumeration finished; tear down any display state.
    fn clear(&mut self);
}

/// A sink that discards all progress updates.
///
/// Used internally by the plain entry points; also handy in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn set_total(&mut self, _total: u64, _label: &str) {}
    fn advance(&mut self) {}
    fn clear(&mut self) {}
}
