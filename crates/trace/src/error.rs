/// Errors returned by the trace session. Exactly one of a [`crate::TraceResult`]
/// or one of these variants is produced per simulate call; a reverted
/// simulation is never an error (it is surfaced through diagnostics).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node could not be reached, rejected the request, or did not answer
    /// within the configured bound. Never retried here.
    #[error("Node unavailable: {0}")]
    NodeUnavailable(String),
    /// The collector program's output did not match the expected schema, or
    /// its event stream was internally inconsistent. The trace is discarded
    /// whole; a partially built frame tree is never returned.
    #[error("Malformed trace: {0}")]
    MalformedTrace(String),
    /// The caller-supplied target, calldata, or overrides could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Internal error passthrough.
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

/// Errors raised while folding the instruction event stream into a frame tree.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An event's reported depth does not match the depth implied by the
    /// current frame stack. This indicates a malformed source trace (or a
    /// builder bug) and is fatal to the whole trace.
    #[error("inconsistent depth at event {index}: expected {expected}, found {found}")]
    InconsistentDepth {
        /// Depth implied by the current frame stack
        expected: usize,
        /// Depth reported by the offending event
        found: usize,
        /// Position of the offending event in the stream
        index: usize,
    },
}

impl From<FrameError> for Error {
    fn from(err: FrameError) -> Self {
        Error::MalformedTrace(err.to_string())
    }
}
