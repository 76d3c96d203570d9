//! Wire schema for the collector program's structured output.
//!
//! The collector runs inside the node (see [`crate::FRAME_COLLECTOR`]) and
//! returns its result verbatim over the `debug_traceCall` response. These
//! types describe that payload exactly; anything that does not deserialize
//! into them is a malformed trace.

use alloy::primitives::{Bytes, B256};
use serde::Deserialize;

/// A single per-instruction event recorded by the collector, in execution
/// order. The order in which the node emitted these is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEvent {
    /// Call depth at which the instruction executed. 1 is the outermost call.
    pub depth: u64,
    /// The instruction name, e.g. `GAS` or `TIMESTAMP`.
    pub op: String,
    /// Set when the instruction had less gas remaining than its cost, i.e.
    /// the frame terminated here due to gas exhaustion.
    #[serde(default)]
    pub oog: bool,
}

/// An event log emitted by the simulated call, carried opaquely. Decoding the
/// topics and data is the policy evaluator's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLog {
    /// The log's topics, zero-padded to 32 bytes by the collector.
    pub topics: Vec<B256>,
    /// The log's raw data bytes.
    pub data: Bytes,
}

/// The collector program's structured result.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCollectorOutput {
    /// Per-instruction events, in execution order.
    pub events: Vec<RawEvent>,
    /// Event logs emitted at any depth, in emission order.
    pub logs: Vec<RawLog>,
    /// Free-text diagnostic lines produced during the run (fault reports).
    #[serde(default)]
    pub debug: Vec<String>,
    /// Whether the outermost simulated call failed.
    #[serde(default)]
    pub failed: bool,
    /// The node-level error string for the outermost call, if any.
    #[serde(default)]
    pub error: Option<String>,
    /// The returndata of the outermost call, hex encoded. Carries the revert
    /// payload when the call reverted.
    #[serde(default)]
    pub output: Option<String>,
}
