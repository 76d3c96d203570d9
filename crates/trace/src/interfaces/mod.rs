mod args;
mod raw;

pub use args::{TraceArgs, TraceArgsBuilder};
pub use raw::{RawCollectorOutput, RawEvent, RawLog};
