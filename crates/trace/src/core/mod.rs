mod collector;
mod diagnostics;
mod frames;
mod types;

pub use collector::FRAME_COLLECTOR;
pub use frames::{ClassifierRules, FrameTreeBuilder};
pub use types::{CallFrame, FrameKind, LogEntry, TraceResult};

use std::time::Duration;

use alloy::{
    eips::BlockId,
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::{
        trace::geth::{
            GethDebugTracerType, GethDebugTracingCallOptions, GethDebugTracingOptions, GethTrace,
        },
        TransactionRequest,
    },
};
use optrace_common::{ether::rpc, utils::strings::decode_hex};
use optrace_config::Configuration;
use tracing::{debug, trace};

use crate::{
    core::diagnostics::collect_diagnostics,
    error::Error,
    interfaces::{RawCollectorOutput, TraceArgs},
};

/// Simulates a call against the node, with the frame/opcode collector running
/// alongside it, and reconstructs the per-call-frame view of the execution
/// trace. Uses the default classifier exemption table.
///
/// A reverted simulated call is returned as a successful [`TraceResult`]
/// whose diagnostics carry the revert reason; only node failures and
/// malformed traces are errors.
pub async fn trace_call(args: TraceArgs) -> Result<TraceResult, Error> {
    trace_call_with_rules(args, ClassifierRules::default()).await
}

/// Same as [`trace_call`], with a caller-supplied classifier exemption table.
pub async fn trace_call_with_rules(
    args: TraceArgs,
    rules: ClassifierRules,
) -> Result<TraceResult, Error> {
    let rpc_url = resolve_rpc_url(&args)?;
    debug!("simulating call to '{}' via '{}'", &args.target, &rpc_url);

    let tx = build_request(&args)?;
    let block = args.block.map(BlockId::number).unwrap_or_else(BlockId::latest);
    let trace_options = build_trace_options(&args);

    // the node call is the sole suspension point; a stalled node must not
    // block the caller past the configured bound. not retried: a later block
    // head may legitimately change the outcome, so retrying is the caller's
    // decision.
    let geth_trace = tokio::time::timeout(
        Duration::from_millis(args.timeout),
        rpc::debug_trace_call(tx, block, trace_options, &rpc_url),
    )
    .await
    .map_err(|_| Error::NodeUnavailable(format!("node did not answer within {}ms", args.timeout)))?
    .map_err(|e| Error::NodeUnavailable(e.to_string()))?;

    let raw: RawCollectorOutput = match geth_trace {
        GethTrace::JS(value) => serde_json::from_value(value).map_err(|e| {
            Error::MalformedTrace(format!("collector output does not match schema: {e}"))
        })?,
        other => {
            return Err(Error::MalformedTrace(format!(
                "node returned an unexpected trace flavor: {other:?}"
            )))
        }
    };
    trace!("collector returned {} instruction events", raw.events.len());

    // single forward pass; a depth inconsistency discards the whole trace
    let mut builder = FrameTreeBuilder::with_rules(rules);
    for event in &raw.events {
        builder.feed(event)?;
    }
    let frames = builder.finish();

    let diagnostics = collect_diagnostics(&raw);
    let logs = raw.logs.into_iter().map(LogEntry::from).collect();

    Ok(TraceResult { frames, logs, diagnostics })
}

/// Resolve the RPC endpoint: an explicit argument wins, otherwise fall back
/// to the stored configuration.
fn resolve_rpc_url(args: &TraceArgs) -> Result<String, Error> {
    if !args.rpc_url.is_empty() {
        return Ok(args.rpc_url.clone());
    }

    let config = Configuration::load()
        .map_err(|e| Error::NodeUnavailable(format!("no RPC URL configured: {e}")))?;
    if !config.rpc_url.is_empty() {
        return Ok(config.rpc_url);
    }
    Ok(config.local_rpc_url)
}

/// Build the simulate-only call request. The wire shape `{to, data, value?,
/// gas?}` is produced by alloy's request type as-is.
fn build_request(args: &TraceArgs) -> Result<TransactionRequest, Error> {
    let target: Address = args
        .target
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("invalid target address: '{}'", args.target)))?;
    let input = decode_hex(&args.data)
        .map_err(|_| Error::InvalidArgument(format!("invalid calldata: '{}'", args.data)))?;

    let mut tx = TransactionRequest::default().with_to(target).with_input(Bytes::from(input));
    if let Some(value) = &args.value {
        let value = value
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("invalid value override: '{value}'")))?;
        tx = tx.with_value(value);
    }
    if let Some(gas) = args.gas {
        tx = tx.with_gas_limit(gas);
    }

    Ok(tx)
}

/// Build the tracing options carrying the collector program. The collector
/// source crosses the wire opaquely in the `tracer` field; the node-side
/// timeout mirrors the local bound.
fn build_trace_options(args: &TraceArgs) -> GethDebugTracingCallOptions {
    let source = args.tracer.clone().unwrap_or_else(|| FRAME_COLLECTOR.to_string());

    let mut tracing_options =
        GethDebugTracingOptions::default().with_tracer(GethDebugTracerType::JsTracer(source));
    tracing_options.timeout = Some(format!("{}ms", args.timeout));

    GethDebugTracingCallOptions::default().with_tracing_options(tracing_options)
}
