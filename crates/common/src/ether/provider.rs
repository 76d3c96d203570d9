//! Create a custom data transport to use with a Provider.
use alloy::{
    eips::BlockId,
    network::Ethereum,
    providers::{ext::DebugApi, Provider, ProviderBuilder, RootProvider},
    rpc::types::{
        trace::geth::{GethDebugTracingCallOptions, GethTrace},
        TransactionRequest,
    },
};
use eyre::Result;

/// [`NodeProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
#[derive(Clone, Debug)]
pub struct NodeProvider {
    provider: RootProvider<Ethereum>,
}

// We implement a convenience "constructor" method, to easily initialize the transport.
// This will connect to [`Http`] if the rpc_url contains 'http', to [`Ws`] if it contains 'ws',
// otherwise it'll default to [`Ipc`].
impl NodeProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| eyre::eyre!("failed to connect to '{rpc_url}': {e}"))?
            .root()
            .clone();
        Ok(Self { provider })
    }

    /// Get the chain id.
    pub async fn get_chainid(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Simulate a call at the given block and return the geth-style trace of its
    /// execution. The `trace_options` parameter carries the tracer (collector
    /// program) to run inside the node, and is serialized onto the wire as-is.
    ///
    /// This is a simulate-only request; no chain state is mutated.
    pub async fn debug_trace_call(
        &self,
        tx: TransactionRequest,
        block: BlockId,
        trace_options: GethDebugTracingCallOptions,
    ) -> Result<GethTrace> {
        let trace = self.provider.debug_trace_call(tx, block, trace_options).await?;
        Ok(trace)
    }
}
