pub mod provider;
pub mod rpc;
