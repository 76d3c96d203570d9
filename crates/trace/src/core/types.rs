use std::collections::BTreeMap;

use alloy::primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::interfaces::RawLog;

/// The kind of instruction that opened a call frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    /// A plain message call.
    #[serde(rename = "CALL")]
    Call,
    /// A call executing the target's code in the caller's context (legacy).
    #[serde(rename = "CALLCODE")]
    CallCode,
    /// A call executing the target's code with the caller's storage and value.
    #[serde(rename = "DELEGATECALL")]
    DelegateCall,
    /// A read-only call.
    #[serde(rename = "STATICCALL")]
    StaticCall,
    /// A contract-creation call.
    #[serde(rename = "CREATE")]
    Create,
    /// A contract-creation call with a deterministic address.
    #[serde(rename = "CREATE2")]
    Create2,
}

impl FrameKind {
    /// Maps a frame-entering instruction name to its frame kind. Returns
    /// `None` for instructions that do not open a frame.
    pub fn from_opcode(op: &str) -> Option<Self> {
        match op {
            "CALL" => Some(Self::Call),
            "CALLCODE" => Some(Self::CallCode),
            "DELEGATECALL" => Some(Self::DelegateCall),
            "STATICCALL" => Some(Self::StaticCall),
            "CREATE" => Some(Self::Create),
            "CREATE2" => Some(Self::Create2),
            _ => None,
        }
    }
}

/// One nested execution context of the simulated call.
///
/// A frame is created the instant a call/create instruction is observed and
/// the node descends into the target, accumulates an instruction histogram
/// while it is the active frame, and is sealed when its terminator (or a gas
/// exhaustion fault) is observed. Sealed frames are never mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    /// Call depth of this frame; 1 is the outermost (privileged) context.
    pub depth: usize,
    /// The instruction that opened this frame.
    pub kind: FrameKind,
    /// Occurrence count per instruction name, for instructions attributed to
    /// this frame by the classifier. Always empty for the depth-1 context.
    pub opcode_counts: BTreeMap<String, u64>,
    /// Whether this frame terminated due to gas exhaustion.
    pub out_of_gas: bool,
    /// Whether this frame read the remaining-gas value outside of the
    /// gas-forwarding idiom (i.e. not immediately before a nested call).
    pub used_gas_opcode_directly: bool,
}

impl CallFrame {
    pub(crate) fn new(depth: usize, kind: FrameKind) -> Self {
        Self {
            depth,
            kind,
            opcode_counts: BTreeMap::new(),
            out_of_gas: false,
            used_gas_opcode_directly: false,
        }
    }
}

/// An event log emitted by the simulated call, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The log's topics, opaque to this core.
    pub topics: Vec<B256>,
    /// The log's raw data bytes, opaque to this core.
    pub data: Bytes,
}

impl From<RawLog> for LogEntry {
    fn from(raw: RawLog) -> Self {
        Self { topics: raw.topics, data: raw.data }
    }
}

/// The structured evidence produced by one simulate call, consumed by the
/// policy evaluator. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// The frame tree, flattened in frame-open (preorder) order. `frames[0]`
    /// is the depth-1 context; parenthood is implied by the depth sequence,
    /// and frames close in strict LIFO order relative to their openings.
    pub frames: Vec<CallFrame>,
    /// Event logs emitted at any depth, in emission order.
    pub logs: Vec<LogEntry>,
    /// Free-text diagnostics from the node and the collector program,
    /// including the revert reason when the outermost call reverted. Never
    /// empty when the outermost call failed.
    pub diagnostics: Vec<String>,
}
