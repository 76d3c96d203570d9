use crate::{error::Error, ether::provider::NodeProvider};
use alloy::{
    eips::BlockId,
    rpc::types::{
        trace::geth::{GethDebugTracingCallOptions, GethTrace},
        TransactionRequest,
    },
};
use tracing::trace;

/// Get the chainId of the provided RPC URL
///
/// ```no_run
/// use optrace_common::ether::rpc::chain_id;
///
/// // let chain_id = chain_id("https://eth.llamarpc.com").await?;
/// // assert_eq!(chain_id, 1);
/// ```
pub async fn chain_id(rpc_url: &str) -> Result<u64, Error> {
    let provider = NodeProvider::connect(rpc_url)
        .await
        .map_err(|_| Error::RpcError(format!("failed to connect to provider '{}'", &rpc_url)))?;
    provider
        .get_chainid()
        .await
        .map_err(|e| Error::RpcError(format!("failed to get chain id: {e}")))
}

/// Get the latest block number of the provided RPC URL
///
/// ```no_run
/// use optrace_common::ether::rpc::latest_block_number;
/// // let block_number = latest_block_number("https://eth.llamarpc.com").await?;
/// // assert!(block_number > 0);
/// ```
pub async fn latest_block_number(rpc_url: &str) -> Result<u128, Error> {
    let provider = NodeProvider::connect(rpc_url)
        .await
        .map_err(|_| Error::RpcError(format!("failed to connect to provider '{}'", &rpc_url)))?;
    provider
        .get_block_number()
        .await
        .map(|n| n as u128)
        .map_err(|e| Error::RpcError(format!("failed to get block number: {e}")))
}

/// Simulate the provided call against the provided RPC URL, running the tracer
/// carried in `trace_options` inside the node, and return its structured output.
///
/// No retries are performed here: a simulate-only call is head-of-chain
/// sensitive, so whether to retry is the caller's decision.
///
/// ```no_run
/// use optrace_common::ether::rpc::debug_trace_call;
///
/// // let trace = debug_trace_call(tx, block, opts, "https://eth.llamarpc.com").await;
/// // assert!(trace.is_ok());
/// ```
pub async fn debug_trace_call(
    tx: TransactionRequest,
    block: BlockId,
    trace_options: GethDebugTracingCallOptions,
    rpc_url: &str,
) -> Result<GethTrace, Error> {
    trace!("fetching trace from node for call: {:?} .", &tx.to);

    let provider = NodeProvider::connect(rpc_url)
        .await
        .map_err(|_| Error::RpcError(format!("failed to connect to provider '{}'", &rpc_url)))?;

    provider
        .debug_trace_call(tx, block, trace_options)
        .await
        .map_err(|e| Error::RpcError(format!("failed to trace call: {e}")))
}
