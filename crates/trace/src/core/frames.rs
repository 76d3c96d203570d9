//! Reconstructs the call-frame tree from the node's flat instruction event
//! stream, classifying each instruction into exactly one frame's histogram
//! along the way.
//!
//! The reconstruction is a single in-order fold: frames are pushed when a
//! call/create instruction is observed and the node descends into the target,
//! and sealed when a terminator (or a gas exhaustion fault) is observed at
//! the matching depth. Events are never reordered, buffered or skipped.

use std::collections::BTreeSet;

use tracing::warn;

use crate::{
    core::types::{CallFrame, FrameKind},
    error::FrameError,
    interfaces::RawEvent,
};

/// Instructions that end the active frame.
const TERMINATORS: [&str; 5] = ["STOP", "RETURN", "REVERT", "SELFDESTRUCT", "INVALID"];

/// The classifier's exemption table.
///
/// An instruction in `gas_reads` is withheld from the histogram until the next
/// instruction in the same frame is seen: if that successor is in
/// `call_family` the read was the standard gas-forwarding idiom and is not
/// counted; otherwise it is counted and flags the frame as having inspected
/// its remaining gas directly. The exact catalog is policy-evaluator
/// knowledge, so it is configurable rather than hard-coded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Instructions that read the remaining-gas value.
    pub gas_reads: BTreeSet<String>,
    /// Instructions that consume a forwarded gas value to enter a nested call.
    pub call_family: BTreeSet<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            gas_reads: BTreeSet::from(["GAS".to_string()]),
            call_family: BTreeSet::from([
                "CALL".to_string(),
                "CALLCODE".to_string(),
                "DELEGATECALL".to_string(),
                "STATICCALL".to_string(),
            ]),
        }
    }
}

/// Bookkeeping for a frame that has been opened but not yet sealed.
#[derive(Debug)]
struct OpenFrame {
    /// Index of the frame in the preorder output vector.
    index: usize,
    /// A gas-read instruction awaiting its successor before classification.
    deferred: Option<String>,
}

/// Incrementally folds an ordered instruction event stream into a frame tree.
///
/// Feed events strictly in execution order via [`FrameTreeBuilder::feed`],
/// then call [`FrameTreeBuilder::finish`] to obtain the frames in frame-open
/// (preorder) order. The depth-1 context is always present as the first
/// frame, with an empty histogram: instructions executed directly at depth 1
/// are not part of the untrusted code under review and are never counted.
#[derive(Debug)]
pub struct FrameTreeBuilder {
    rules: ClassifierRules,
    frames: Vec<CallFrame>,
    stack: Vec<OpenFrame>,
    pending_call: Option<FrameKind>,
    seen: usize,
}

impl Default for FrameTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTreeBuilder {
    /// Creates a builder with the default exemption table.
    pub fn new() -> Self {
        Self::with_rules(ClassifierRules::default())
    }

    /// Creates a builder with a caller-supplied exemption table.
    pub fn with_rules(rules: ClassifierRules) -> Self {
        let root = CallFrame::new(1, FrameKind::Call);
        Self {
            rules,
            frames: vec![root],
            stack: vec![OpenFrame { index: 0, deferred: None }],
            pending_call: None,
            seen: 0,
        }
    }

    /// Consumes the next instruction event in execution order.
    pub fn feed(&mut self, event: &RawEvent) -> Result<(), FrameError> {
        let index = self.seen;
        self.seen += 1;

        let depth = event.depth as usize;
        if depth == 0 {
            return Err(FrameError::InconsistentDepth {
                expected: self.stack.len(),
                found: 0,
                index,
            });
        }

        // the previous instruction attempted to enter a nested frame; the
        // frame exists only if the node actually descended into the target
        if let Some(kind) = self.pending_call.take() {
            if depth == self.stack.len() + 1 {
                self.open_frame(kind);
            }
        }

        // a depth drop with no preceding terminator is an abnormal unwind:
        // the intervening frames died of gas exhaustion
        while depth < self.stack.len() {
            self.seal_top(true);
        }

        if depth > self.stack.len() {
            return Err(FrameError::InconsistentDepth {
                expected: self.stack.len(),
                found: depth,
                index,
            });
        }

        self.classify(&event.op);

        if event.oog {
            if let Some(active) = self.stack.last() {
                self.frames[active.index].out_of_gas = true;
            }
        }

        if let Some(kind) = FrameKind::from_opcode(&event.op) {
            if event.oog {
                // the enclosing frame ran out of gas on the call instruction
                // itself; the attempted child is recorded, sealed, never
                // entered
                let mut child = CallFrame::new(self.stack.len() + 1, kind);
                child.out_of_gas = true;
                self.frames.push(child);
            } else {
                self.pending_call = Some(kind);
            }
        } else if TERMINATORS.contains(&event.op.as_str()) && self.stack.len() > 1 {
            self.seal_top(false);
        }

        Ok(())
    }

    /// Seals any frames still open and returns the frame tree in preorder.
    pub fn finish(mut self) -> Vec<CallFrame> {
        if self.pending_call.is_some() {
            warn!("event stream ended on a call instruction; attempted frame never entered");
        }

        // frames still open past the root never saw a terminator, which means
        // the stream ended mid-frame on exhausted gas
        while self.stack.len() > 1 {
            self.seal_top(true);
        }
        self.seal_top(false);

        self.frames
    }

    /// Attributes `op` to the active frame's histogram, applying the one-step
    /// deferred classification for gas reads. Instructions at depth 1 are
    /// never counted.
    fn classify(&mut self, op: &str) {
        let Some(active) = self.stack.last_mut() else { return };
        let frame = &mut self.frames[active.index];
        if frame.depth == 1 {
            return;
        }

        if let Some(deferred) = active.deferred.take() {
            if !self.rules.call_family.contains(op) {
                // the gas read was not forwarding into a nested call: the
                // code inspected its remaining gas for its own decision logic
                *frame.opcode_counts.entry(deferred).or_insert(0) += 1;
                frame.used_gas_opcode_directly = true;
            }
        }

        if self.rules.gas_reads.contains(op) {
            active.deferred = Some(op.to_string());
        } else {
            *frame.opcode_counts.entry(op.to_string()).or_insert(0) += 1;
        }
    }

    /// Seals the active frame and reactivates its parent as the receiver of
    /// subsequent accumulation.
    fn seal_top(&mut self, out_of_gas: bool) {
        let Some(open) = self.stack.pop() else { return };
        let frame = &mut self.frames[open.index];

        // a gas read with no successor in its frame had no following call
        if let Some(deferred) = open.deferred {
            *frame.opcode_counts.entry(deferred).or_insert(0) += 1;
            frame.used_gas_opcode_directly = true;
        }

        if out_of_gas {
            frame.out_of_gas = true;
        }
    }

    fn open_frame(&mut self, kind: FrameKind) {
        let depth = self.stack.len() + 1;
        self.frames.push(CallFrame::new(depth, kind));
        self.stack.push(OpenFrame { index: self.frames.len() - 1, deferred: None });
    }
}
