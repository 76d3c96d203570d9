//! Error types for the common crate.

/// Errors raised by shared resources, primarily RPC access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error when communicating with the RPC endpoint
    #[error("RPC error: {0}")]
    RpcError(String),
    /// An error when parsing user-provided input
    #[error("Parse error: {0}")]
    ParseError(String),
    /// A generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
