pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use crate::core::{
    trace_call, trace_call_with_rules, CallFrame, ClassifierRules, FrameKind, FrameTreeBuilder,
    LogEntry, TraceResult, FRAME_COLLECTOR,
};
pub use interfaces::{RawCollectorOutput, RawEvent, RawLog, TraceArgs, TraceArgsBuilder};
