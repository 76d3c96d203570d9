//! Common utilities and resources shared across the optrace workspace.
//!
//! This crate provides the node-facing provider wrapper used by the trace
//! session, along with general utility functions used by the other crates.

/// Error types for the common crate.
pub mod error;

/// Utilities for interacting with an Ethereum node, including the provider
/// wrapper and RPC helper functions.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
