//! Host boundary: injected logging and progress reporting instead of a
//! global mutable logger singleton. Callers (the CLI, a future editor
//! integration) supply their own [`Logger`]/[`ProgressSink`] impls; the
//! engine never reaches for a process-wide logger of its own.

/// Minimal structured-logging seam. The default [`TracingLogger`] forwards
/// to the `tracing` macros; tests use [`NullLogger`] to keep output quiet.
pub trait Logger: Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to `tracing`'s global subscriber. This is the logger the CLI
/// wires up in `main`, after installing a `tracing-subscriber` format layer.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Discards everything. Used by unit tests and anywhere a `&dyn Logger` is
/// required but output isn't wanted.
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// The fixed sequence of analysis milestones a [`ProgressSink`] is notified
/// of. Closed set, not a free-form string, so callers can exhaustively
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ScanStart,
    ScanDone,
    DepsStart,
    DepsDone,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ScanStart => "scan-start",
            Stage::ScanDone => "scan-done",
            Stage::DepsStart => "deps-start",
            Stage::DepsDone => "deps-done",
            Stage::Done => "done",
        }
    }
}

/// Progress-reporting seam, notified at each [`Stage`] boundary. `count` is
/// the number of files involved in the stage that just finished (0 for the
/// `*Start` stages).
pub trait ProgressSink: Sync {
    fn on_stage(&self, stage: Stage, count: usize);
}

/// Drops every notification. The default when a caller doesn't care about
/// progress (used by tests and one-shot CLI invocations without `--verbose`).
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_stage(&self, _stage: Stage, _count: usize) {}
}
